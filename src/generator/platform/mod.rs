//! Platform-specific icon set generation.
//!
//! Each platform module drives the compositor over a resolved size set and
//! writes the platform's metadata alongside the rasters.
//!
//! | Platform | Output tree | Metadata |
//! |----------|-------------|----------|
//! | iOS | flat `ios/` directory of PNGs | `Contents.json` manifest |
//! | Android | `android/mipmap-<density>/` per bucket | `mipmap-anydpi-v26/` adaptive descriptors |
//!
//! The platform set is a closed enum: adding a platform means extending
//! [`Platform`] and its dispatch arms, keeping the set exhaustively
//! checkable at compile time.

pub mod android;
pub mod ios;

use crate::generator::catalog::{ANDROID_CONTENT_RATIO, IOS_CONTENT_RATIO, SizeCatalog};
use serde::Deserialize;
use std::fmt;

/// Supported target platforms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS (flattened icons + asset-catalog manifest).
    Ios,
    /// Android (per-density mipmap tree, optionally adaptive layers).
    Android,
}

impl Platform {
    /// Returns the short name for this platform.
    ///
    /// This is the lowercase identifier used in CLI output and output paths.
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Returns every supported platform, in generation order.
    pub fn all() -> Vec<Platform> {
        vec![Platform::Ios, Platform::Android]
    }

    /// Safe-zone content ratio the compositor applies by default for this
    /// platform.
    pub fn content_ratio(&self) -> f64 {
        match self {
            Platform::Ios => IOS_CONTENT_RATIO,
            Platform::Android => ANDROID_CONTENT_RATIO,
        }
    }

    /// Returns the built-in size catalog for this platform.
    pub fn catalog(&self) -> SizeCatalog {
        SizeCatalog::of(*self)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(Platform::Ios.short_name(), "ios");
        assert_eq!(Platform::Android.short_name(), "android");
    }

    #[test]
    fn all_platforms_are_listed() {
        let all = Platform::all();
        assert!(all.contains(&Platform::Ios));
        assert!(all.contains(&Platform::Android));
    }

    #[test]
    fn android_safe_zone_ratio_is_66_of_108() {
        let ratio = Platform::Android.content_ratio();
        assert!((ratio - 66.0 / 108.0).abs() < 1e-9);
    }
}
