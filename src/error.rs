//! Top-level error type for the iconsmith binary.

use thiserror::Error;

/// Result type alias for CLI-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the CLI layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Argument or customization-file problems.
    #[error("{0}")]
    Cli(String),

    /// Errors from the generator core.
    #[error(transparent)]
    Generator(#[from] crate::generator::error::Error),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Actionable hints printed after a fatal error.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            AppError::Cli(_) => vec!["Run with --help for usage".to_string()],
            AppError::Generator(crate::generator::error::Error::Validation(_)) => vec![
                "Fix every listed problem in the customization file, then re-run".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
