//! Built-in size catalogs for the supported platforms.
//!
//! A catalog is the fixed, ordered list of icon artifacts a platform
//! requires, plus the platform constants that drive compositing (safe-zone
//! content ratio, adaptive support). Catalogs are build-time data and are
//! never mutated at runtime; customization works on copies.
//!
//! # Catalog contents
//!
//! | Platform | Entries | Notes |
//! |----------|---------|-------|
//! | iOS | 19 | iPhone + iPad + App Store marketing, `~ipad` filename suffix |
//! | Android | 12 legacy + 18 adaptive | one `mipmap-<density>/` folder per bucket |

use crate::generator::platform::Platform;

/// Fraction of the canvas the foreground content occupies on iOS.
///
/// iOS has no system-imposed launcher mask, so most of the canvas is usable.
pub const IOS_CONTENT_RATIO: f64 = 0.9;

/// Fraction of the canvas the foreground content occupies on Android.
///
/// The adaptive-icon safe zone is a 66dp circle on a 108dp canvas; content
/// outside it can be clipped by circular/squircle/rounded-square launcher
/// masks.
pub const ANDROID_CONTENT_RATIO: f64 = 66.0 / 108.0;

/// iOS manifest idiom for a catalog entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Idiom {
    /// iPhone home screen, spotlight, settings, notification slots.
    Iphone,
    /// iPad slots.
    Ipad,
    /// App Store marketing artwork (1024pt).
    IosMarketing,
}

impl Idiom {
    /// The identifier used in `Contents.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

/// What a rendered file is, which decides how the compositor draws it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// A flattened icon: the only role iOS emits, and the role of
    /// user-added custom sizes.
    Flat,
    /// Android legacy `ic_launcher.png`.
    Launcher,
    /// Android legacy `ic_launcher_round.png`.
    LauncherRound,
    /// Adaptive foreground layer, padded to the safe zone.
    Foreground,
    /// Adaptive background layer, cover-filled.
    Background,
    /// Adaptive monochrome layer, padded like the foreground but kept as a
    /// separate grayscale output.
    Monochrome,
}

impl Role {
    /// Whether this role only exists in Android adaptive mode.
    pub fn is_adaptive_layer(&self) -> bool {
        matches!(self, Role::Foreground | Role::Background | Role::Monochrome)
    }

    /// Android filename stem for this role.
    fn android_stem(&self) -> &'static str {
        match self {
            Role::Launcher | Role::Flat => "ic_launcher",
            Role::LauncherRound => "ic_launcher_round",
            Role::Foreground => "ic_launcher_foreground",
            Role::Background => "ic_launcher_background",
            Role::Monochrome => "ic_launcher_monochrome",
        }
    }
}

/// Logical size labelling for an entry, used by exclusion matching and by
/// the metadata writers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SizeLabel {
    /// iOS point size + scale multiplier, e.g. `29x29` at `2x`.
    Points {
        /// Point-size label, e.g. `"29x29"` or `"83.5x83.5"`.
        size: String,
        /// Scale label, e.g. `"2x"`.
        scale: String,
        /// Manifest idiom.
        idiom: Idiom,
    },
    /// Android density bucket, e.g. `xxhdpi`.
    Density {
        /// Bucket name, `ldpi`..`xxxhdpi`.
        bucket: String,
    },
    /// User-supplied addition, labelled only by its pixel dimensions.
    Custom {
        /// Scale label for the iOS manifest, e.g. `"1x"`.
        scale: String,
    },
}

/// One required output artifact. Immutable once resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct IconSpec {
    /// Output canvas width in pixels.
    pub width_px: u32,
    /// Output canvas height in pixels.
    pub height_px: u32,
    /// Logical size labelling.
    pub label: SizeLabel,
    /// How the compositor should draw this entry.
    pub role: Role,
    /// Bare output filename.
    pub filename: String,
    /// Output path relative to the platform root. Unique within a resolved
    /// size set.
    pub subpath: String,
}

impl IconSpec {
    /// Returns a copy with pixel dimensions multiplied by `factor`.
    ///
    /// Scaling changes resolution only; filenames and labels are unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut spec = self.clone();
        spec.width_px = scale_px(self.width_px, factor);
        spec.height_px = scale_px(self.height_px, factor);
        spec
    }
}

fn scale_px(px: u32, factor: f64) -> u32 {
    (px as f64 * factor).round() as u32
}

/// A platform's catalog of required icon specifications.
#[derive(Clone, Debug)]
pub struct SizeCatalog {
    /// Ordered default entries.
    pub defaults: Vec<IconSpec>,
    /// Safe-zone content ratio used by the compositor.
    pub content_ratio: f64,
    /// Whether the platform supports layered adaptive icons.
    pub supports_adaptive: bool,
    /// Identifier of the metadata file schema this platform emits.
    pub metadata_schema: &'static str,
}

impl SizeCatalog {
    /// Returns the built-in catalog for `platform`.
    pub fn of(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Self {
                defaults: ios_defaults(),
                content_ratio: IOS_CONTENT_RATIO,
                supports_adaptive: false,
                metadata_schema: "asset-catalog-contents-v1",
            },
            Platform::Android => Self {
                defaults: android_defaults(),
                content_ratio: ANDROID_CONTENT_RATIO,
                supports_adaptive: true,
                metadata_schema: "adaptive-icon-anydpi-v26",
            },
        }
    }
}

// Point size, scale multiplier, idiom. 19 entries; the iPad rows repeat
// some point sizes, disambiguated by the `~ipad` filename suffix.
const IOS_DEFAULTS: &[(f64, u8, Idiom)] = &[
    (20.0, 2, Idiom::Iphone),
    (20.0, 3, Idiom::Iphone),
    (29.0, 1, Idiom::Iphone),
    (29.0, 2, Idiom::Iphone),
    (29.0, 3, Idiom::Iphone),
    (40.0, 2, Idiom::Iphone),
    (40.0, 3, Idiom::Iphone),
    (60.0, 2, Idiom::Iphone),
    (60.0, 3, Idiom::Iphone),
    (20.0, 1, Idiom::Ipad),
    (20.0, 2, Idiom::Ipad),
    (29.0, 1, Idiom::Ipad),
    (29.0, 2, Idiom::Ipad),
    (40.0, 1, Idiom::Ipad),
    (40.0, 2, Idiom::Ipad),
    (76.0, 1, Idiom::Ipad),
    (76.0, 2, Idiom::Ipad),
    (83.5, 2, Idiom::Ipad),
    (1024.0, 1, Idiom::IosMarketing),
];

// Density bucket, legacy launcher size, adaptive layer canvas size. The
// adaptive sizes follow the 108dp canvas at each bucket's density factor.
const ANDROID_DENSITIES: &[(&str, u32, u32)] = &[
    ("ldpi", 36, 81),
    ("mdpi", 48, 108),
    ("hdpi", 72, 162),
    ("xhdpi", 96, 216),
    ("xxhdpi", 144, 324),
    ("xxxhdpi", 192, 432),
];

/// Formats an iOS point size, trimming the fraction when whole (`29`, `83.5`).
pub(crate) fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as u32)
    } else {
        format!("{}", points)
    }
}

fn ios_defaults() -> Vec<IconSpec> {
    IOS_DEFAULTS
        .iter()
        .map(|&(points, scale, idiom)| {
            let px = (points * scale as f64).round() as u32;
            let size = format_points(points);
            let filename = match idiom {
                Idiom::IosMarketing => format!("AppIcon-{size}x{size}.png"),
                Idiom::Iphone => format!("AppIcon-{size}x{size}@{scale}x.png"),
                Idiom::Ipad => format!("AppIcon-{size}x{size}@{scale}x~ipad.png"),
            };
            IconSpec {
                width_px: px,
                height_px: px,
                label: SizeLabel::Points {
                    size: format!("{size}x{size}"),
                    scale: format!("{scale}x"),
                    idiom,
                },
                role: Role::Flat,
                filename: filename.clone(),
                subpath: filename,
            }
        })
        .collect()
}

fn android_defaults() -> Vec<IconSpec> {
    let mut defaults = Vec::new();
    for &(bucket, launcher_px, adaptive_px) in ANDROID_DENSITIES {
        let legacy = [Role::Launcher, Role::LauncherRound];
        let adaptive = [Role::Foreground, Role::Background, Role::Monochrome];
        for role in legacy.into_iter().chain(adaptive) {
            let px = if role.is_adaptive_layer() {
                adaptive_px
            } else {
                launcher_px
            };
            let filename = format!("{}.png", role.android_stem());
            defaults.push(IconSpec {
                width_px: px,
                height_px: px,
                label: SizeLabel::Density {
                    bucket: bucket.to_string(),
                },
                role,
                filename: filename.clone(),
                subpath: format!("mipmap-{bucket}/{filename}"),
            });
        }
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ios_catalog_has_nineteen_unique_entries() {
        let catalog = SizeCatalog::of(Platform::Ios);
        assert_eq!(catalog.defaults.len(), 19);

        let subpaths: HashSet<_> = catalog.defaults.iter().map(|s| &s.subpath).collect();
        assert_eq!(subpaths.len(), 19, "every subpath must be unique");
    }

    #[test]
    fn ios_pixel_sizes_follow_point_times_scale() {
        let catalog = SizeCatalog::of(Platform::Ios);
        let app_3x = catalog
            .defaults
            .iter()
            .find(|s| s.filename == "AppIcon-60x60@3x.png")
            .expect("60pt@3x entry");
        assert_eq!(app_3x.width_px, 180);

        let ipad_pro = catalog
            .defaults
            .iter()
            .find(|s| s.filename == "AppIcon-83.5x83.5@2x~ipad.png")
            .expect("83.5pt@2x entry");
        assert_eq!(ipad_pro.width_px, 167);
    }

    #[test]
    fn android_catalog_covers_all_densities_and_roles() {
        let catalog = SizeCatalog::of(Platform::Android);
        assert!(catalog.supports_adaptive);
        // 6 densities x (2 legacy + 3 adaptive roles)
        assert_eq!(catalog.defaults.len(), 30);

        let subpaths: HashSet<_> = catalog.defaults.iter().map(|s| &s.subpath).collect();
        assert_eq!(subpaths.len(), 30);

        let xxxhdpi_fg = catalog
            .defaults
            .iter()
            .find(|s| s.subpath == "mipmap-xxxhdpi/ic_launcher_foreground.png")
            .expect("xxxhdpi foreground entry");
        assert_eq!(xxxhdpi_fg.width_px, 432);
    }

    #[test]
    fn scaling_changes_resolution_not_names() {
        let catalog = SizeCatalog::of(Platform::Ios);
        let entry = &catalog.defaults[0];
        let scaled = entry.scaled(1.2);
        assert_eq!(scaled.filename, entry.filename);
        assert_eq!(scaled.width_px, (entry.width_px as f64 * 1.2).round() as u32);
    }

    #[test]
    fn point_label_formatting() {
        assert_eq!(format_points(29.0), "29");
        assert_eq!(format_points(83.5), "83.5");
    }
}
