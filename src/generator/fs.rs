//! File system helpers for writing output trees.

use crate::generator::error::{ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Writes `bytes` to `path`, creating any parent directories as needed.
pub(crate) async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }
    fs::write(path, bytes)
        .await
        .fs_context("writing file", path)
}
