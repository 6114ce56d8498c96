//! Command line interface.
//!
//! The CLI is a thin collaborator shell around the generator core: parse
//! arguments, deserialize the optional customization file in one fallible
//! step, run the orchestrator, and print one line per platform outcome.

mod args;
mod output;

pub use args::{Args, PlatformArg};
pub use output::OutputManager;

use crate::error::{AppError, Result};
use crate::generator::compositor::CompositorConfig;
use crate::generator::customize::CustomizationRequest;
use crate::generator::orchestrator::Orchestrator;
use std::path::Path;

/// Runs the CLI and returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new();

    let request = match &args.config {
        Some(path) => load_request(path)?,
        None => CustomizationRequest::default(),
    };
    let source = args.source_request().map_err(AppError::Cli)?;
    let platforms = args.platform.platforms();

    let orchestrator = Orchestrator::new(CompositorConfig::default(), request, &args.output);
    let outcomes = orchestrator.generate(&source, &platforms).await?;

    let mut failed = false;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => output.success(&format!(
                "{}: {} icons, {} metadata file(s) in {}",
                outcome.platform,
                result.files.len(),
                result.metadata_files.len(),
                result.output_root.display()
            )),
            Err(e) => {
                failed = true;
                output.error(&format!("{}: {e}", outcome.platform));
            }
        }
    }

    Ok(if failed { 1 } else { 0 })
}

/// Deserializes the customization file. A parse failure rejects the whole
/// request; no partially-valid customization ever reaches the generator.
fn load_request(path: &Path) -> Result<CustomizationRequest> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Cli(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::Cli(format!("invalid customization file {}: {e}", path.display())))
}
