//! # iconsmith
//!
//! Generate complete, platform-compliant app icon sets for iOS and Android
//! from source artwork, including Android's layered adaptive-icon format.
//!
//! ## Features
//!
//! - **Size catalogs**: every required iOS and Android output size, built in
//! - **Customization**: global/per-platform scaling, exclusion patterns,
//!   additional sizes — validated up front with every problem reported at once
//! - **Safe-zone compositing**: foreground artwork padded to survive
//!   arbitrary launcher masks; layers blended or emitted separately per
//!   platform rules
//! - **Parallel rendering**: per-size renders fan out over a CPU-bound
//!   worker pool; one platform's failure never aborts its siblings
//!
//! ## Usage
//!
//! ```bash
//! iconsmith logo.png                                   # both platforms
//! iconsmith --foreground fg.png --monochrome mono.png  # adaptive layers
//! iconsmith logo.png --platform ios --config custom.json
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod generator;

// Re-export main types for public API
pub use error::{AppError, Result};
pub use generator::{
    Compositor, CompositorConfig, CustomizationRequest, GenerationResult, Orchestrator, Platform,
    PlatformOutcome, SourceRequest,
};
