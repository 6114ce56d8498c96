//! Multi-platform app icon generation.
//!
//! This module turns source artwork into complete, platform-compliant icon
//! sets for iOS and Android, including Android's layered adaptive-icon
//! format.
//!
//! # Pipeline
//!
//! 1. A [`customize::CustomizationRequest`] is resolved against the
//!    platform's built-in [`catalog::SizeCatalog`] into a final size set.
//! 2. The [`compositor::Compositor`] renders each size, applying the
//!    platform's safe-zone padding to layered artwork.
//! 3. Platform generators write the output tree and metadata (iOS
//!    `Contents.json`, Android adaptive descriptors).
//! 4. The [`orchestrator::Orchestrator`] fans the work out per platform and
//!    aggregates one outcome per platform.
//!
//! # Output trees
//!
//! | Platform | Layout |
//! |----------|--------|
//! | iOS | `ios/AppIcon-*.png` + `ios/Contents.json` |
//! | Android | `android/mipmap-<density>/ic_launcher*.png` + `android/mipmap-anydpi-v26/*.xml` |

#![warn(missing_docs)]

pub mod catalog;
pub mod compositor;
pub mod customize;
pub mod error;
pub mod orchestrator;
pub mod platform;
pub mod resources;

pub(crate) mod fs;
pub(crate) mod render;

// Public re-exports
pub use catalog::{IconSpec, Role, SizeCatalog, SizeLabel};
pub use compositor::{Compositor, CompositorConfig, RenderedIcon};
pub use customize::{CustomizationRequest, ResolvedSizeSet, ValidationError, resolve};
pub use error::{Error, Result, Stage};
pub use orchestrator::{Orchestrator, PlatformOutcome};
pub use platform::Platform;
pub use resources::{Background, BackgroundInput, IconSource, LayerSet, SourceRequest};

use std::path::PathBuf;

/// A completed platform generation.
///
/// Created once per platform per invocation and never mutated afterwards.
/// External collaborators (archiving, project installation) consume the
/// `output_root` path and the file lists; this core does not archive or
/// install anything itself.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Platform the set was generated for.
    pub platform: Platform,

    /// Root directory of the platform's output tree.
    pub output_root: PathBuf,

    /// Every rendered icon file, sorted by path.
    pub files: Vec<PathBuf>,

    /// Metadata files written alongside the rasters (iOS manifest, Android
    /// adaptive descriptors).
    pub metadata_files: Vec<PathBuf>,
}
