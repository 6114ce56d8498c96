//! Layer compositing and safe-zone padding.
//!
//! The compositor produces one canvas of exactly the spec's pixel size per
//! rendered icon. Foreground and monochrome layers are fitted into the
//! platform's safe zone in two mandatory steps: resize to fit *within* the
//! inner content square (letterbox, never crop), then extend with
//! transparent padding out to the full canvas. Backgrounds are cover-fitted
//! with no padding. Resizing the foreground straight to the canvas size
//! would ignore the padding ratio entirely and is deliberately not offered.
//!
//! All configuration is an explicit [`CompositorConfig`] constructor
//! parameter; there is no module-level state.

use crate::generator::catalog::{IconSpec, Role};
use crate::generator::error::{Error, Result};
use crate::generator::platform::Platform;
use crate::generator::resources::{Background, IconSource, LayerSet};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

/// Canvas size of the flattened iOS seed composite.
pub const IOS_SEED_SIZE: u32 = 1024;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Immutable compositor configuration.
#[derive(Clone, Copy, Debug)]
pub struct CompositorConfig {
    /// Content ratio applied to iOS foregrounds when flattening layers.
    pub ios_content_ratio: f64,
    /// Content ratio applied to Android foreground/monochrome layers.
    pub android_content_ratio: f64,
    /// Resampling filter for every resize.
    pub filter: FilterType,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            ios_content_ratio: crate::generator::catalog::IOS_CONTENT_RATIO,
            android_content_ratio: crate::generator::catalog::ANDROID_CONTENT_RATIO,
            filter: FilterType::Lanczos3,
        }
    }
}

impl CompositorConfig {
    /// The content ratio in effect for `platform`.
    pub fn content_ratio(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Ios => self.ios_content_ratio,
            Platform::Android => self.android_content_ratio,
        }
    }
}

/// Safe-zone geometry for one canvas size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SafeZone {
    /// Side of the inner content square.
    pub inner: u32,
    /// Transparent padding on the left/top.
    pub pad_leading: u32,
    /// Transparent padding on the right/bottom.
    pub pad_trailing: u32,
}

impl SafeZone {
    /// Computes the inner square and padding split for a square canvas.
    ///
    /// `inner = round(canvas * ratio)`; the remaining pixels are split
    /// between the two sides, leading side taking the floor. The three
    /// parts always sum to exactly `canvas`.
    pub fn for_canvas(canvas: u32, ratio: f64) -> Self {
        let inner = ((canvas as f64) * ratio).round().min(canvas as f64) as u32;
        let total = canvas - inner;
        let pad_leading = total / 2;
        Self {
            inner,
            pad_leading,
            pad_trailing: total - pad_leading,
        }
    }
}

/// The compositor's output for one icon spec: encoded PNG bytes, ready to
/// write to the spec's subpath.
#[derive(Clone, Debug)]
pub struct RenderedIcon {
    /// The spec this raster satisfies.
    pub spec: IconSpec,
    /// Encoded PNG data.
    pub png: Vec<u8>,
}

/// Renders icon specs from a read-only [`IconSource`].
///
/// `render_one` takes the source by shared reference and internally builds
/// fresh buffers for every transform, so concurrent calls over one shared
/// source never alias a mutable raster.
#[derive(Debug)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    /// Creates a compositor with the given configuration.
    pub fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Renders a single spec to an encoded PNG.
    pub fn render_one(
        &self,
        source: &IconSource,
        spec: &IconSpec,
        platform: Platform,
    ) -> Result<RenderedIcon> {
        let image = match spec.role {
            Role::Flat | Role::Launcher | Role::LauncherRound => {
                self.render_flat(source, spec, platform)
            }
            Role::Foreground => {
                let layers = require_layers(source, spec, platform)?;
                DynamicImage::ImageRgba8(self.pad_layer(
                    &layers.foreground,
                    spec.width_px,
                    self.config.content_ratio(platform),
                ))
            }
            Role::Background => {
                let layers = require_layers(source, spec, platform)?;
                DynamicImage::ImageRgba8(self.fill_background(&layers.background, spec.width_px))
            }
            Role::Monochrome => {
                let layers = require_layers(source, spec, platform)?;
                let artwork = layers.monochrome.as_ref().unwrap_or(&layers.foreground);
                let padded = self.pad_layer(
                    artwork,
                    spec.width_px,
                    self.config.content_ratio(platform),
                );
                DynamicImage::ImageLumaA8(DynamicImage::ImageRgba8(padded).to_luma_alpha8())
            }
        };

        let png = encode_png(&image).map_err(|e| Error::Render {
            platform,
            subpath: spec.subpath.clone(),
            detail: e.to_string(),
        })?;

        log::debug!(
            "rendered {} ({}x{}) for {}",
            spec.subpath,
            spec.width_px,
            spec.height_px,
            platform
        );
        Ok(RenderedIcon {
            spec: spec.clone(),
            png,
        })
    }

    /// Flattens a layer set into a single opaque composite of `size x size`:
    /// safe-zone-padded foreground alpha-blended over the cover-filled
    /// background.
    pub fn flatten(&self, layers: &LayerSet, size: u32, platform: Platform) -> RgbaImage {
        let mut canvas = self.fill_background(&layers.background, size);
        let foreground =
            self.pad_layer(&layers.foreground, size, self.config.content_ratio(platform));
        imageops::overlay(&mut canvas, &foreground, 0, 0);
        canvas
    }

    fn render_flat(
        &self,
        source: &IconSource,
        spec: &IconSpec,
        platform: Platform,
    ) -> DynamicImage {
        match source {
            IconSource::Flat(img) => img.resize_to_fill(spec.width_px, spec.height_px, self.config.filter),
            IconSource::Layered(layers) => {
                // Flatten on a square canvas; non-square custom sizes are
                // cover-cropped from it.
                let side = spec.width_px.max(spec.height_px);
                let flattened = DynamicImage::ImageRgba8(self.flatten(layers, side, platform));
                if spec.width_px == spec.height_px {
                    flattened
                } else {
                    flattened.resize_to_fill(spec.width_px, spec.height_px, self.config.filter)
                }
            }
        }
    }

    // Step one of the mandatory two-step fit: contain the layer inside the
    // inner content square, letterboxed on transparency. Step two: extend
    // the result with transparent padding out to the full canvas.
    fn pad_layer(&self, layer: &DynamicImage, canvas: u32, ratio: f64) -> RgbaImage {
        let zone = SafeZone::for_canvas(canvas, ratio);
        let content = fit_within(layer, zone.inner, self.config.filter);
        extend_with_padding(&content, zone.pad_leading, zone.pad_trailing)
    }

    fn fill_background(&self, background: &Background, size: u32) -> RgbaImage {
        match background {
            Background::Raster(img) => {
                img.resize_to_fill(size, size, self.config.filter).to_rgba8()
            }
            Background::Color(color) => {
                let opaque = Rgba([color[0], color[1], color[2], 0xFF]);
                RgbaImage::from_pixel(size, size, opaque)
            }
        }
    }
}

fn require_layers<'a>(
    source: &'a IconSource,
    spec: &IconSpec,
    platform: Platform,
) -> Result<&'a LayerSet> {
    match source {
        IconSource::Layered(layers) => Ok(layers),
        IconSource::Flat(_) => Err(Error::Render {
            platform,
            subpath: spec.subpath.clone(),
            detail: "adaptive layer output requested for a single-image source".to_string(),
        }),
    }
}

/// Resizes `layer` to fit within `inner x inner` preserving aspect ratio,
/// centered on a transparent letterbox canvas. Never crops.
fn fit_within(layer: &DynamicImage, inner: u32, filter: FilterType) -> RgbaImage {
    let fitted = layer.resize(inner, inner, filter).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(inner, inner, TRANSPARENT);
    let x = (inner - fitted.width()) / 2;
    let y = (inner - fitted.height()) / 2;
    imageops::overlay(&mut canvas, &fitted, x as i64, y as i64);
    canvas
}

/// Extends `content` with transparent fill: `leading` pixels on the left
/// and top, `trailing` pixels on the right and bottom.
fn extend_with_padding(content: &RgbaImage, leading: u32, trailing: u32) -> RgbaImage {
    let width = leading + content.width() + trailing;
    let height = leading + content.height() + trailing;
    let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);
    imageops::overlay(&mut canvas, content, leading as i64, leading as i64);
    canvas
}

fn encode_png(image: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog::SizeLabel;

    fn spec(width: u32, height: u32, role: Role, subpath: &str) -> IconSpec {
        IconSpec {
            width_px: width,
            height_px: height,
            label: SizeLabel::Custom { scale: "1x".into() },
            role,
            filename: subpath.rsplit('/').next().unwrap_or(subpath).to_string(),
            subpath: subpath.to_string(),
        }
    }

    fn red_square(side: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(side, side, Rgba([200, 40, 40, 255])))
    }

    #[test]
    fn android_safe_zone_at_432() {
        let zone = SafeZone::for_canvas(432, 66.0 / 108.0);
        assert_eq!(zone.inner, 264);
        assert_eq!(zone.pad_leading, 84);
        assert_eq!(zone.pad_trailing, 84);
    }

    #[test]
    fn safe_zone_parts_always_sum_to_canvas() {
        for canvas in 1..=512 {
            for ratio in [66.0 / 108.0, 0.9, 1.0] {
                let zone = SafeZone::for_canvas(canvas, ratio);
                assert_eq!(
                    zone.inner + zone.pad_leading + zone.pad_trailing,
                    canvas,
                    "canvas {canvas} ratio {ratio}"
                );
            }
        }
    }

    #[test]
    fn padded_foreground_has_transparent_margin() {
        let compositor = Compositor::new(CompositorConfig::default());
        let padded = compositor.pad_layer(&red_square(512), 108, 66.0 / 108.0);
        assert_eq!(padded.dimensions(), (108, 108));
        // Corners sit in the padding and must be fully transparent.
        assert_eq!(padded.get_pixel(0, 0)[3], 0);
        assert_eq!(padded.get_pixel(107, 107)[3], 0);
        // Center carries the artwork.
        assert_eq!(padded.get_pixel(54, 54)[3], 255);
    }

    #[test]
    fn aspect_ratio_is_preserved_never_cropped() {
        // A wide layer letterboxes inside the inner square.
        let wide = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            400,
            100,
            Rgba([10, 200, 10, 255]),
        ));
        let fitted = fit_within(&wide, 200, FilterType::Lanczos3);
        assert_eq!(fitted.dimensions(), (200, 200));
        // Top edge is letterbox fill, vertical center is artwork.
        assert_eq!(fitted.get_pixel(100, 0)[3], 0);
        assert_eq!(fitted.get_pixel(100, 100)[3], 255);
    }

    #[test]
    fn solid_background_fills_opaque() {
        let compositor = Compositor::new(CompositorConfig::default());
        let filled = compositor.fill_background(&Background::Color(Rgba([1, 2, 3, 0])), 64);
        assert_eq!(filled.dimensions(), (64, 64));
        assert_eq!(*filled.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn flatten_shows_background_through_the_padding() {
        let compositor = Compositor::new(CompositorConfig::default());
        let layers = LayerSet {
            foreground: red_square(256),
            background: Background::Color(Rgba([0, 0, 255, 255])),
            monochrome: None,
        };
        let flat = compositor.flatten(&layers, 108, Platform::Android);
        // Padding corner: pure background.
        assert_eq!(*flat.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        // Safe-zone center: foreground.
        assert_eq!(*flat.get_pixel(54, 54), Rgba([200, 40, 40, 255]));
    }

    #[test]
    fn monochrome_render_is_grayscale() {
        let compositor = Compositor::new(CompositorConfig::default());
        let layers = LayerSet {
            foreground: red_square(256),
            background: Background::Color(Rgba([0, 0, 255, 255])),
            monochrome: None,
        };
        let source = IconSource::Layered(layers);
        let rendered = compositor
            .render_one(
                &source,
                &spec(108, 108, Role::Monochrome, "mipmap-mdpi/ic_launcher_monochrome.png"),
                Platform::Android,
            )
            .expect("render");
        let decoded = image::load_from_memory(&rendered.png).expect("decode");
        assert_eq!(decoded.color(), image::ColorType::La8);
    }

    #[test]
    fn adaptive_layer_from_flat_source_is_an_error() {
        let compositor = Compositor::new(CompositorConfig::default());
        let source = IconSource::Flat(red_square(64));
        let err = compositor
            .render_one(
                &source,
                &spec(108, 108, Role::Foreground, "mipmap-mdpi/ic_launcher_foreground.png"),
                Platform::Android,
            )
            .expect_err("must fail");
        assert!(matches!(err, Error::Render { .. }));
    }

    #[test]
    fn rendering_is_idempotent() {
        let compositor = Compositor::new(CompositorConfig::default());
        let layers = LayerSet {
            foreground: red_square(300),
            background: Background::Color(Rgba([20, 20, 20, 255])),
            monochrome: None,
        };
        let source = IconSource::Layered(layers);
        let spec = spec(192, 192, Role::Launcher, "mipmap-xxxhdpi/ic_launcher.png");
        let first = compositor
            .render_one(&source, &spec, Platform::Android)
            .expect("first render");
        let second = compositor
            .render_one(&source, &spec, Platform::Android)
            .expect("second render");
        assert_eq!(first.png, second.png);
    }

    #[test]
    fn flat_render_matches_spec_dimensions() {
        let compositor = Compositor::new(CompositorConfig::default());
        let source = IconSource::Flat(red_square(512));
        let rendered = compositor
            .render_one(
                &source,
                &spec(216, 216, Role::Flat, "AppIcon-60x60@3x.png"),
                Platform::Ios,
            )
            .expect("render");
        let decoded = image::load_from_memory(&rendered.png).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (216, 216));
    }
}
