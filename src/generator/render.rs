//! Bounded parallel rendering of a platform's size set.
//!
//! Every size in a resolved set is independent, so the whole batch is
//! dispatched at once and bounded by a semaphore sized to the CPU count;
//! the raster work itself runs under `spawn_blocking`. The decoded source
//! is shared read-only behind `Arc` — render tasks only ever produce new
//! buffers, never transform a shared one in place.

use crate::generator::compositor::Compositor;
use crate::generator::error::{Error, Result};
use crate::generator::catalog::IconSpec;
use crate::generator::platform::Platform;
use crate::generator::resources::IconSource;
use crate::generator::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Renders every spec and writes the results under `platform_root`.
///
/// The first failing render or write cancels the platform's remaining
/// in-flight tasks and fails the whole batch; no partial success.
pub(crate) async fn render_batch(
    compositor: Arc<Compositor>,
    source: Arc<IconSource>,
    specs: Vec<IconSpec>,
    platform: Platform,
    platform_root: &Path,
) -> Result<Vec<PathBuf>> {
    let limit = num_cpus::get().max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks = JoinSet::new();

    log::debug!(
        "dispatching {} render tasks for {} (pool of {})",
        specs.len(),
        platform,
        limit
    );

    for spec in specs {
        let semaphore = Arc::clone(&semaphore);
        let compositor = Arc::clone(&compositor);
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| Error::Generic(format!("render pool closed: {e}")))?;
            tokio::task::spawn_blocking(move || compositor.render_one(&source, &spec, platform))
                .await
                .map_err(|e| Error::Generic(format!("render task failed: {e}")))?
        });
    }

    let mut written = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let rendered = match joined {
            Ok(Ok(rendered)) => rendered,
            Ok(Err(e)) => {
                tasks.abort_all();
                return Err(e);
            }
            Err(e) if e.is_cancelled() => continue,
            Err(e) => {
                tasks.abort_all();
                return Err(Error::Generic(format!("render task panicked: {e}")));
            }
        };

        let path = platform_root.join(&rendered.spec.subpath);
        if let Err(e) = fs::write_file(&path, &rendered.png).await {
            tasks.abort_all();
            return Err(e);
        }
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    // Tasks complete in no particular order; report deterministically.
    written.sort();
    Ok(written)
}
