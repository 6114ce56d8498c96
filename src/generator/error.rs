//! Error types for icon generation.
//!
//! Follows the taxonomy from the design: validation problems are aggregated
//! and surfaced before any rendering starts, while input/render/write
//! failures are fatal for the affected platform only. Every error carries
//! enough context (platform, stage, offending spec or pattern) to be
//! actionable without re-running with verbose logging.

use crate::generator::customize::ValidationError;
use crate::generator::platform::Platform;
use std::{
    fmt::{self, Display},
    io,
    path::PathBuf,
};
use thiserror::Error as DeriveError;

/// Stage of a platform generation pass, carried in stage-tagged errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Confirming required inputs are present and decodable.
    Validating,
    /// Resolving the size catalog against the customization request.
    Resolving,
    /// Rendering every resolved icon spec.
    Rendering,
    /// Writing the platform metadata files.
    WritingMetadata,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Resolving => "resolving",
            Stage::Rendering => "rendering",
            Stage::WritingMetadata => "writing-metadata",
        };
        write!(f, "{}", name)
    }
}

/// Errors returned by the generator core.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "writing icon")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The customization request was rejected. Aggregates every problem
    /// found so a caller can fix all of them in one pass.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A source image could not be read or decoded.
    #[error("cannot decode {role} layer {path}: {source}")]
    Decode {
        /// Layer role the file was supplied for ("source", "foreground", ...)
        role: &'static str,
        /// Path to the offending file
        path: PathBuf,
        /// The underlying decode error
        source: image::ImageError,
    },

    /// A source image uses a color mode the pipeline does not accept.
    #[error(
        "unsupported color mode {color:?} in {path}: supply an 8- or 16-bit RGB, RGBA, or grayscale image"
    )]
    UnsupportedColorMode {
        /// Path to the offending file
        path: PathBuf,
        /// The decoded color type
        color: image::ColorType,
    },

    /// A single size's composite/resize/encode operation failed. Fatal for
    /// the platform's whole batch.
    #[error("rendering {subpath} for {platform}: {detail}")]
    Render {
        /// Platform whose batch failed
        platform: Platform,
        /// Output subpath of the failing spec
        subpath: String,
        /// What went wrong
        detail: String,
    },

    /// A platform generation pass failed; wraps the underlying error with
    /// the platform name and the stage it failed in.
    #[error("{platform} generation failed while {stage}: {source}")]
    Platform {
        /// Platform that failed
        platform: Platform,
        /// Stage the failure occurred in
        stage: Stage,
        /// The underlying error
        source: Box<Self>,
    },

    /// Generic image processing error.
    #[error("{0}")]
    Image(#[from] image::ImageError),

    /// Generic I/O error.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// JSON serialization error (iOS manifest).
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// Tags this error with the platform and stage it occurred in.
    pub fn at_stage(self, platform: Platform, stage: Stage) -> Self {
        Error::Platform {
            platform,
            stage,
            source: Box::new(self),
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::Generic(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::Generic(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g., "writing icon", "creating output directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

