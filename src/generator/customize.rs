//! Customization requests and size-set resolution.
//!
//! A [`CustomizationRequest`] is the strongly-typed form of the user's
//! optional scaling/exclusion/addition rules. It deserializes from JSON in a
//! single fallible step; downstream code never re-validates fields.
//!
//! [`resolve`] merges a request into a platform catalog and either returns
//! the final [`ResolvedSizeSet`] or a [`ValidationError`] aggregating every
//! problem found, so a user can fix all issues in one pass.

use crate::generator::catalog::{IconSpec, Role, SizeCatalog, SizeLabel};
use crate::generator::platform::Platform;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Lower bound (exclusive) for user scale factors.
pub const MIN_SCALE: f64 = 0.5;
/// Upper bound (inclusive) for user scale factors.
pub const MAX_SCALE: f64 = 3.0;

/// Optional user customization of a platform's default size catalog.
///
/// All fields default to "no change". Scale factors are bounded
/// `(0.5, 3.0]`; values outside the range are a validation error, never
/// silently clamped.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomizationRequest {
    /// Scale applied to every platform unless overridden per platform.
    #[serde(default)]
    pub global_scale: Option<f64>,

    /// Per-platform scale overrides.
    #[serde(default)]
    pub platform_scale: PlatformScales,

    /// Per-platform exclusion patterns (see [`resolve`] for matching rules).
    #[serde(default)]
    pub exclude: PlatformPatterns,

    /// Per-platform additional sizes, appended after the surviving defaults.
    #[serde(default)]
    pub add_sizes: PlatformAdditions,
}

impl CustomizationRequest {
    /// Effective scale for `platform`: the platform override, else the
    /// global scale, else `1.0`.
    pub fn effective_scale(&self, platform: Platform) -> f64 {
        self.platform_scale
            .get(platform)
            .or(self.global_scale)
            .unwrap_or(1.0)
    }
}

/// Per-platform scale overrides.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformScales {
    /// iOS scale override.
    #[serde(default)]
    pub ios: Option<f64>,
    /// Android scale override.
    #[serde(default)]
    pub android: Option<f64>,
}

impl PlatformScales {
    fn get(&self, platform: Platform) -> Option<f64> {
        match platform {
            Platform::Ios => self.ios,
            Platform::Android => self.android,
        }
    }
}

/// Per-platform exclusion pattern lists.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformPatterns {
    /// iOS patterns (`"WxH@Nx"`, `"WxH"`, `"@Nx"`).
    #[serde(default)]
    pub ios: Vec<String>,
    /// Android patterns (substring of density, folder, or filename).
    #[serde(default)]
    pub android: Vec<String>,
}

impl PlatformPatterns {
    fn get(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::Ios => &self.ios,
            Platform::Android => &self.android,
        }
    }
}

/// Per-platform additional size lists.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformAdditions {
    /// Extra iOS sizes.
    #[serde(default)]
    pub ios: Vec<CustomIconSize>,
    /// Extra Android sizes.
    #[serde(default)]
    pub android: Vec<CustomIconSize>,
}

impl PlatformAdditions {
    fn get(&self, platform: Platform) -> &[CustomIconSize] {
        match platform {
            Platform::Ios => &self.ios,
            Platform::Android => &self.android,
        }
    }
}

/// A user-supplied additional output size.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomIconSize {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output filename, e.g. `"AppIcon-Notification.png"`.
    pub filename: String,
    /// Optional iOS scale label for the manifest (`"2x"`); defaults to `1x`.
    #[serde(default)]
    pub scale: Option<String>,
    /// Density folder for Android additions (`"xhdpi"`). Required on Android.
    #[serde(default)]
    pub density: Option<String>,
}

/// A single problem found while validating a customization request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Problem {
    /// A scale factor fell outside `(0.5, 3.0]`.
    #[error("{scope} scale factor {value} is out of range (0.5, 3.0]")]
    ScaleOutOfRange {
        /// Which knob carried the bad value ("global" or a platform name).
        scope: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An added size's output path collides with a surviving entry.
    #[error("added size '{filename}' collides with existing entry '{subpath}'")]
    FilenameCollision {
        /// Filename of the addition.
        filename: String,
        /// The colliding output subpath.
        subpath: String,
    },

    /// An added size is missing or misusing a required field.
    #[error("added size '{filename}' is malformed: {reason}")]
    MalformedAddition {
        /// Filename of the addition (may be empty).
        filename: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Aggregated validation failure: every problem found in one pass.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub struct ValidationError {
    /// All problems detected, in detection order.
    pub problems: Vec<Problem>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid customization request ({} problem{}):",
            self.problems.len(),
            if self.problems.len() == 1 { "" } else { "s" }
        )?;
        for problem in &self.problems {
            write!(f, "\n  - {problem}")?;
        }
        Ok(())
    }
}

/// The final, deduplicated, ordered list of icon specs to render for one
/// platform.
#[derive(Clone, Debug)]
pub struct ResolvedSizeSet {
    /// Platform the set was resolved for.
    pub platform: Platform,
    /// Whether adaptive layer entries participate.
    pub adaptive: bool,
    /// Specs in render order: scaled defaults minus exclusions, then
    /// additions in request order. No two entries share a subpath.
    pub specs: Vec<IconSpec>,
}

/// Merges `request` into `catalog` for `platform`.
///
/// Resolution order: copy defaults (dropping adaptive layer entries when the
/// request is not adaptive), apply the effective scale, apply exclusions,
/// append additions. Exclusion matching rules:
///
/// - iOS: `"WxH@Nx"` matches that exact point size and scale; `"WxH"`
///   matches every scale variant of that point size; `"@Nx"` matches every
///   entry of that scale.
/// - Android: the pattern matches case-sensitively as a substring of the
///   density name, folder name, or filename.
///
/// An addition whose subpath collides with a *surviving* default is a
/// validation error; colliding with an *excluded* default is allowed
/// (exclude-then-replace is a valid composition). All problems are
/// aggregated; nothing is partially applied.
pub fn resolve(
    platform: Platform,
    catalog: &SizeCatalog,
    request: &CustomizationRequest,
    adaptive: bool,
) -> Result<ResolvedSizeSet, ValidationError> {
    let mut problems = Vec::new();

    if let Some(value) = request.global_scale
        && !scale_in_range(value)
    {
        problems.push(Problem::ScaleOutOfRange {
            scope: "global",
            value,
        });
    }
    if let Some(value) = request.platform_scale.get(platform)
        && !scale_in_range(value)
    {
        problems.push(Problem::ScaleOutOfRange {
            scope: platform.short_name(),
            value,
        });
    }

    let scale = request.effective_scale(platform);
    // Keep resolving with the neutral scale so every other problem in the
    // request is still reported in the same pass.
    let scale = if scale_in_range(scale) { scale } else { 1.0 };

    let mut specs: Vec<IconSpec> = catalog
        .defaults
        .iter()
        .filter(|spec| adaptive || !spec.role.is_adaptive_layer())
        .map(|spec| spec.scaled(scale))
        .collect();

    for pattern in request.exclude.get(platform) {
        let before = specs.len();
        specs.retain(|spec| !matches_pattern(platform, spec, pattern));
        if specs.len() == before {
            log::debug!("exclusion pattern {pattern:?} matched no {platform} entries");
        }
    }

    let mut taken: HashSet<String> = specs.iter().map(|s| s.subpath.clone()).collect();
    for addition in request.add_sizes.get(platform) {
        match addition_spec(platform, addition) {
            Ok(spec) => {
                if taken.contains(&spec.subpath) {
                    problems.push(Problem::FilenameCollision {
                        filename: addition.filename.clone(),
                        subpath: spec.subpath.clone(),
                    });
                } else {
                    taken.insert(spec.subpath.clone());
                    specs.push(spec);
                }
            }
            Err(reason) => problems.push(Problem::MalformedAddition {
                filename: addition.filename.clone(),
                reason,
            }),
        }
    }

    if problems.is_empty() {
        Ok(ResolvedSizeSet {
            platform,
            adaptive,
            specs,
        })
    } else {
        Err(ValidationError { problems })
    }
}

fn scale_in_range(value: f64) -> bool {
    value > MIN_SCALE && value <= MAX_SCALE
}

fn addition_spec(platform: Platform, addition: &CustomIconSize) -> Result<IconSpec, String> {
    if addition.filename.is_empty() {
        return Err("filename is required".to_string());
    }
    if addition.width == 0 || addition.height == 0 {
        return Err("dimensions must be non-zero".to_string());
    }

    let (label, subpath) = match platform {
        Platform::Ios => (
            SizeLabel::Custom {
                scale: addition.scale.clone().unwrap_or_else(|| "1x".to_string()),
            },
            addition.filename.clone(),
        ),
        Platform::Android => {
            let Some(bucket) = addition.density.as_deref() else {
                return Err("density folder is required for android sizes".to_string());
            };
            (
                SizeLabel::Density {
                    bucket: bucket.to_string(),
                },
                format!("mipmap-{bucket}/{}", addition.filename),
            )
        }
    };

    Ok(IconSpec {
        width_px: addition.width,
        height_px: addition.height,
        label,
        role: Role::Flat,
        filename: addition.filename.clone(),
        subpath,
    })
}

fn matches_pattern(platform: Platform, spec: &IconSpec, pattern: &str) -> bool {
    match platform {
        Platform::Ios => matches_ios_pattern(spec, pattern),
        Platform::Android => matches_android_pattern(spec, pattern),
    }
}

// iOS patterns are structured: "29x29@2x" pins point size and scale,
// "29x29" takes every scale variant, "@2x" takes every size at that scale.
fn matches_ios_pattern(spec: &IconSpec, pattern: &str) -> bool {
    let SizeLabel::Points { size, scale, .. } = &spec.label else {
        return false;
    };

    if let Some(scale_pattern) = pattern.strip_prefix('@') {
        return scale == scale_pattern;
    }
    match pattern.split_once('@') {
        Some((size_pattern, scale_pattern)) => size == size_pattern && scale == scale_pattern,
        None => size == pattern,
    }
}

// Android patterns are loose, case-sensitive substring matches against the
// density name, the folder, or the filename.
fn matches_android_pattern(spec: &IconSpec, pattern: &str) -> bool {
    if spec.filename.contains(pattern) || spec.subpath.contains(pattern) {
        return true;
    }
    match &spec.label {
        SizeLabel::Density { bucket } => bucket.contains(pattern),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ios_catalog() -> SizeCatalog {
        SizeCatalog::of(Platform::Ios)
    }

    fn android_catalog() -> SizeCatalog {
        SizeCatalog::of(Platform::Android)
    }

    #[test]
    fn default_request_keeps_all_ios_entries() {
        let set = resolve(
            Platform::Ios,
            &ios_catalog(),
            &CustomizationRequest::default(),
            false,
        )
        .expect("default request is valid");
        assert_eq!(set.specs.len(), 19);
    }

    #[test]
    fn resolved_subpaths_are_unique() {
        let request = CustomizationRequest {
            add_sizes: PlatformAdditions {
                ios: vec![CustomIconSize {
                    width: 512,
                    height: 512,
                    filename: "AppIcon-512.png".into(),
                    scale: None,
                    density: None,
                }],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        let unique: HashSet<_> = set.specs.iter().map(|s| &s.subpath).collect();
        assert_eq!(unique.len(), set.specs.len());
    }

    #[test]
    fn scale_bounds_are_enforced_for_global_and_platform() {
        for bad in [0.5, 0.4, 3.01, -1.0] {
            let request = CustomizationRequest {
                global_scale: Some(bad),
                ..Default::default()
            };
            let err = resolve(Platform::Ios, &ios_catalog(), &request, false)
                .expect_err("out-of-range global scale must be rejected");
            assert!(matches!(
                err.problems[0],
                Problem::ScaleOutOfRange { scope: "global", .. }
            ));

            let request = CustomizationRequest {
                platform_scale: PlatformScales {
                    android: Some(bad),
                    ios: None,
                },
                ..Default::default()
            };
            let err = resolve(Platform::Android, &android_catalog(), &request, true)
                .expect_err("out-of-range platform scale must be rejected");
            assert!(matches!(
                err.problems[0],
                Problem::ScaleOutOfRange { scope: "android", .. }
            ));
        }

        // Inclusive upper bound.
        let request = CustomizationRequest {
            global_scale: Some(3.0),
            ..Default::default()
        };
        assert!(resolve(Platform::Ios, &ios_catalog(), &request, false).is_ok());
    }

    #[test]
    fn platform_scale_overrides_global() {
        let request = CustomizationRequest {
            global_scale: Some(2.0),
            platform_scale: PlatformScales {
                ios: Some(1.0),
                android: None,
            },
            ..Default::default()
        };
        assert!((request.effective_scale(Platform::Ios) - 1.0).abs() < 1e-9);
        assert!((request.effective_scale(Platform::Android) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn global_scale_multiplies_pixel_dimensions() {
        let request = CustomizationRequest {
            global_scale: Some(1.2),
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        let entry = set
            .specs
            .iter()
            .find(|s| s.filename == "AppIcon-60x60@3x.png")
            .expect("60pt@3x entry");
        assert_eq!(entry.width_px, 216);
        assert_eq!(entry.height_px, 216);
    }

    #[test]
    fn ios_point_size_pattern_removes_every_scale_variant() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: vec!["29x29".into()],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        assert!(set.specs.iter().all(|s| !s.filename.contains("29x29")));
        // iPhone 1x/2x/3x plus iPad 1x/2x slots are gone, nothing else.
        assert_eq!(set.specs.len(), 14);
    }

    #[test]
    fn ios_scale_pattern_removes_all_sizes_of_that_scale() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: vec!["@3x".into()],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        assert!(set.specs.iter().all(|s| !s.filename.contains("@3x")));
        assert_eq!(set.specs.len(), 15);
    }

    #[test]
    fn ios_exact_pattern_removes_one_entry() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: vec!["60x60@3x".into()],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        assert_eq!(set.specs.len(), 18);
        assert!(set.specs.iter().all(|s| s.filename != "AppIcon-60x60@3x.png"));
    }

    #[test]
    fn android_density_pattern_removes_exactly_that_bucket() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: Vec::new(),
                android: vec!["ldpi".into()],
            },
            ..Default::default()
        };
        let set = resolve(Platform::Android, &android_catalog(), &request, true).expect("valid");
        assert!(set.specs.iter().all(|s| !s.subpath.starts_with("mipmap-ldpi/")));
        // 5 remaining densities x 5 roles.
        assert_eq!(set.specs.len(), 25);
    }

    #[test]
    fn android_filename_pattern_removes_matching_roles() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: Vec::new(),
                android: vec!["monochrome".into()],
            },
            ..Default::default()
        };
        let set = resolve(Platform::Android, &android_catalog(), &request, true).expect("valid");
        assert!(set.specs.iter().all(|s| !s.filename.contains("monochrome")));
        assert_eq!(set.specs.len(), 24);
    }

    #[test]
    fn non_adaptive_android_resolution_has_no_layer_entries() {
        let set = resolve(
            Platform::Android,
            &android_catalog(),
            &CustomizationRequest::default(),
            false,
        )
        .expect("valid");
        assert_eq!(set.specs.len(), 12);
        assert!(set.specs.iter().all(|s| !s.role.is_adaptive_layer()));
    }

    #[test]
    fn additions_append_after_defaults_in_request_order() {
        let request = CustomizationRequest {
            add_sizes: PlatformAdditions {
                ios: vec![
                    CustomIconSize {
                        width: 50,
                        height: 50,
                        filename: "First.png".into(),
                        scale: None,
                        density: None,
                    },
                    CustomIconSize {
                        width: 100,
                        height: 100,
                        filename: "Second.png".into(),
                        scale: None,
                        density: None,
                    },
                ],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false).expect("valid");
        assert_eq!(set.specs.len(), 21);
        assert_eq!(set.specs[19].filename, "First.png");
        assert_eq!(set.specs[20].filename, "Second.png");
    }

    #[test]
    fn addition_colliding_with_surviving_default_is_rejected() {
        let request = CustomizationRequest {
            add_sizes: PlatformAdditions {
                ios: vec![CustomIconSize {
                    width: 64,
                    height: 64,
                    filename: "AppIcon-20x20@2x.png".into(),
                    scale: None,
                    density: None,
                }],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let err = resolve(Platform::Ios, &ios_catalog(), &request, false)
            .expect_err("collision must be rejected");
        assert!(matches!(err.problems[0], Problem::FilenameCollision { .. }));
    }

    #[test]
    fn exclude_then_replace_is_allowed() {
        let request = CustomizationRequest {
            exclude: PlatformPatterns {
                ios: vec!["20x20@2x".into()],
                android: Vec::new(),
            },
            add_sizes: PlatformAdditions {
                ios: vec![CustomIconSize {
                    width: 64,
                    height: 64,
                    filename: "AppIcon-20x20@2x.png".into(),
                    scale: Some("2x".into()),
                    density: None,
                }],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let set = resolve(Platform::Ios, &ios_catalog(), &request, false)
            .expect("replacing an excluded entry is valid");
        let replaced = set
            .specs
            .iter()
            .find(|s| s.filename == "AppIcon-20x20@2x.png")
            .expect("replacement present");
        // The replacement keeps the user's dimensions, not the default's.
        assert_eq!(replaced.width_px, 64);
        // Both iphone and ipad 20x20@2x slots were excluded, one came back.
        assert_eq!(set.specs.len(), 18);
    }

    #[test]
    fn all_problems_are_reported_together() {
        let request = CustomizationRequest {
            global_scale: Some(5.0),
            add_sizes: PlatformAdditions {
                ios: vec![
                    CustomIconSize {
                        width: 0,
                        height: 64,
                        filename: "Broken.png".into(),
                        scale: None,
                        density: None,
                    },
                    CustomIconSize {
                        width: 64,
                        height: 64,
                        filename: "AppIcon-1024x1024.png".into(),
                        scale: None,
                        density: None,
                    },
                ],
                android: Vec::new(),
            },
            ..Default::default()
        };
        let err = resolve(Platform::Ios, &ios_catalog(), &request, false)
            .expect_err("multiple problems expected");
        assert_eq!(err.problems.len(), 3);
    }

    #[test]
    fn android_addition_requires_density() {
        let request = CustomizationRequest {
            add_sizes: PlatformAdditions {
                ios: Vec::new(),
                android: vec![CustomIconSize {
                    width: 64,
                    height: 64,
                    filename: "extra.png".into(),
                    scale: None,
                    density: None,
                }],
            },
            ..Default::default()
        };
        let err = resolve(Platform::Android, &android_catalog(), &request, false)
            .expect_err("missing density must be rejected");
        assert!(matches!(err.problems[0], Problem::MalformedAddition { .. }));
    }

    #[test]
    fn request_parses_from_json_in_one_step() {
        let json = r#"{
            "global_scale": 1.5,
            "exclude": { "android": ["ldpi"] },
            "add_sizes": { "ios": [
                { "width": 512, "height": 512, "filename": "Store.png" }
            ]}
        }"#;
        let request: CustomizationRequest = serde_json::from_str(json).expect("parses");
        assert_eq!(request.global_scale, Some(1.5));
        assert_eq!(request.exclude.android, vec!["ldpi".to_string()]);
        assert_eq!(request.add_sizes.ios.len(), 1);

        // Unknown fields are a parse error, not a silently-ignored typo.
        let bad = r#"{ "globel_scale": 1.5 }"#;
        assert!(serde_json::from_str::<CustomizationRequest>(bad).is_err());
    }
}
