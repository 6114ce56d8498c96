//! Source image loading and layer management.
//!
//! A [`SourceRequest`] names the files the user supplied; [`SourceRequest::load`]
//! decodes the layers a platform actually needs into an [`IconSource`].
//! Decoded layers are read-only inputs to compositing: render tasks share
//! them behind `Arc` and only ever produce new buffers.

use crate::generator::error::{Error, Result};
use crate::generator::platform::Platform;
use image::{ColorType, DynamicImage, Rgba};
use std::path::{Path, PathBuf};

/// Background color used when a layered request supplies no background.
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([0x11, 0x11, 0x11, 0xFF]);

/// The background of a layered request: a raster or a solid color.
#[derive(Debug)]
pub enum Background {
    /// A decoded raster, cover-fitted to each canvas.
    Raster(DynamicImage),
    /// A solid color synthesized as an opaque canvas.
    Color(Rgba<u8>),
}

/// Decoded input layers for a layered (adaptive-capable) request.
///
/// Read-only once constructed; the compositor consumes it by reference and
/// never mutates the contained rasters.
#[derive(Debug)]
pub struct LayerSet {
    /// Foreground artwork, fitted into the safe zone.
    pub foreground: DynamicImage,
    /// Background layer; [`DEFAULT_BACKGROUND`] when the user supplied none.
    pub background: Background,
    /// Optional monochrome artwork; derived from the foreground when absent.
    pub monochrome: Option<DynamicImage>,
}

/// Decoded source for one platform's generation pass.
#[derive(Debug)]
pub enum IconSource {
    /// A single pre-composed image, used as-is for every size.
    Flat(DynamicImage),
    /// Separate layers composited per platform rules.
    Layered(LayerSet),
}

impl IconSource {
    /// Whether this source carries separate layers (Android adaptive mode).
    pub fn is_layered(&self) -> bool {
        matches!(self, IconSource::Layered(_))
    }
}

/// Background input as supplied on the command line or over an API.
#[derive(Clone, Debug)]
pub enum BackgroundInput {
    /// Path to a background raster.
    Path(PathBuf),
    /// A solid color.
    Color(Rgba<u8>),
}

/// The user's source files, before decoding.
///
/// Each platform decodes only the layers it consumes, so a corrupt layer
/// that one platform never reads cannot fail a sibling platform.
#[derive(Clone, Debug)]
pub enum SourceRequest {
    /// One pre-composed image.
    Flat {
        /// Path to the image.
        path: PathBuf,
    },
    /// Foreground plus optional background/monochrome layers.
    Layered {
        /// Path to the foreground artwork.
        foreground: PathBuf,
        /// Background raster path or solid color; defaults to
        /// [`DEFAULT_BACKGROUND`].
        background: Option<BackgroundInput>,
        /// Path to monochrome artwork (Android only).
        monochrome: Option<PathBuf>,
    },
}

impl SourceRequest {
    /// Whether this request carries separate layers.
    pub fn is_layered(&self) -> bool {
        matches!(self, SourceRequest::Layered { .. })
    }

    /// Decodes the layers `platform` consumes.
    ///
    /// iOS flattens layers into a single seed and never emits layer files,
    /// so its monochrome layer (if any) is not decoded at all.
    pub fn load(&self, platform: Platform) -> Result<IconSource> {
        match self {
            SourceRequest::Flat { path } => Ok(IconSource::Flat(decode_layer("source", path)?)),
            SourceRequest::Layered {
                foreground,
                background,
                monochrome,
            } => {
                let foreground = decode_layer("foreground", foreground)?;
                let background = match background {
                    Some(BackgroundInput::Path(path)) => {
                        Background::Raster(decode_layer("background", path)?)
                    }
                    Some(BackgroundInput::Color(color)) => Background::Color(*color),
                    None => Background::Color(DEFAULT_BACKGROUND),
                };
                let monochrome = match (platform, monochrome) {
                    (Platform::Android, Some(path)) => {
                        Some(decode_layer("monochrome", path)?)
                    }
                    _ => None,
                };
                Ok(IconSource::Layered(LayerSet {
                    foreground,
                    background,
                    monochrome,
                }))
            }
        }
    }
}

/// Decodes one layer and rejects color modes the pipeline cannot carry
/// through to PNG output.
pub(crate) fn decode_layer(role: &'static str, path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    match img.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            return Err(Error::UnsupportedColorMode {
                path: path.to_path_buf(),
                color: img.color(),
            });
        }
        _ => {}
    }

    log::debug!(
        "decoded {} layer: {}x{} from {}",
        role,
        img.width(),
        img.height(),
        path.display()
    );
    Ok(img)
}
