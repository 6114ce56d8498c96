//! Command line argument parsing and validation.
//!
//! The argument surface stays thin: it maps directly onto the generator's
//! input model and defers everything else to the customization file.

use crate::generator::platform::Platform;
use crate::generator::resources::{BackgroundInput, SourceRequest};
use clap::{Parser, ValueEnum};
use image::Rgba;
use std::path::PathBuf;
use std::str::FromStr;

/// Generate iOS and Android app icon sets from source artwork
#[derive(Parser, Debug)]
#[command(
    name = "iconsmith",
    version,
    about = "Generate iOS and Android app icon sets from source artwork",
    long_about = "Generate complete, platform-compliant icon sets.

Usage:
  iconsmith logo.png
  iconsmith --foreground fg.png --background-color '#1a6dd8' --monochrome mono.png
  iconsmith logo.png --platform ios --output assets/icons --config custom.json"
)]
pub struct Args {
    /// Pre-composed source image, used as-is for every size
    #[arg(value_name = "IMAGE", required_unless_present = "foreground")]
    pub source: Option<PathBuf>,

    /// Foreground layer; enables Android adaptive output
    #[arg(long, conflicts_with = "source")]
    pub foreground: Option<PathBuf>,

    /// Background layer image
    #[arg(long, requires = "foreground", conflicts_with = "background_color")]
    pub background: Option<PathBuf>,

    /// Solid background color in CSS syntax (e.g. "#1a6dd8")
    #[arg(long, requires = "foreground")]
    pub background_color: Option<String>,

    /// Monochrome layer for Android themed icons
    #[arg(long, requires = "foreground")]
    pub monochrome: Option<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "icons")]
    pub output: PathBuf,

    /// Target platform
    #[arg(long, short, value_enum, default_value_t = PlatformArg::All)]
    pub platform: PlatformArg,

    /// Customization file (JSON): scaling, exclusions, extra sizes
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Platform selector, including the multi-platform `all` value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlatformArg {
    /// iOS only.
    Ios,
    /// Android only.
    Android,
    /// Every supported platform.
    All,
}

impl PlatformArg {
    /// Expands the selector into concrete platforms.
    pub fn platforms(&self) -> Vec<Platform> {
        match self {
            PlatformArg::Ios => vec![Platform::Ios],
            PlatformArg::Android => vec![Platform::Android],
            PlatformArg::All => Platform::all(),
        }
    }
}

impl std::fmt::Display for PlatformArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlatformArg::Ios => "ios",
            PlatformArg::Android => "android",
            PlatformArg::All => "all",
        };
        write!(f, "{}", name)
    }
}

impl Args {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the source request from the parsed arguments.
    pub fn source_request(&self) -> Result<SourceRequest, String> {
        if let Some(path) = &self.source {
            return Ok(SourceRequest::Flat { path: path.clone() });
        }
        let foreground = self
            .foreground
            .clone()
            .ok_or_else(|| "a source image or --foreground is required".to_string())?;

        let background = match (&self.background, &self.background_color) {
            (Some(path), _) => Some(BackgroundInput::Path(path.clone())),
            (None, Some(color)) => Some(BackgroundInput::Color(parse_css_color(color)?)),
            (None, None) => None,
        };

        Ok(SourceRequest::Layered {
            foreground,
            background,
            monochrome: self.monochrome.clone(),
        })
    }
}

fn parse_css_color(value: &str) -> Result<Rgba<u8>, String> {
    css_color::Srgb::from_str(value)
        .map(|color| {
            Rgba([
                (color.red * 255.0) as u8,
                (color.green * 255.0) as u8,
                (color.blue * 255.0) as u8,
                255,
            ])
        })
        .map_err(|_| format!("invalid background color: {value:?}"))
}
