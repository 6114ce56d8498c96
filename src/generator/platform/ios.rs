//! iOS icon set generation and asset-catalog manifest.
//!
//! iOS only ever emits flattened icons. A layered request is flattened once
//! into a 1024px seed composite; every catalog size is then a plain resize
//! of that seed. The `Contents.json` manifest enumerates every generated
//! filename with its logical size, scale, and idiom — the only file a
//! downstream asset-catalog tool needs to locate the set.

use crate::generator::GenerationResult;
use crate::generator::catalog::{IconSpec, SizeLabel};
use crate::generator::compositor::{Compositor, IOS_SEED_SIZE};
use crate::generator::customize::ResolvedSizeSet;
use crate::generator::error::{Context, Error, Result, Stage};
use crate::generator::platform::Platform;
use crate::generator::render::render_batch;
use crate::generator::resources::{IconSource, SourceRequest};
use crate::generator::fs;
use image::DynamicImage;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Format version written into the manifest's `info` block.
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct Manifest {
    images: Vec<ManifestImage>,
    info: ManifestInfo,
}

#[derive(Debug, Serialize)]
struct ManifestImage {
    filename: String,
    idiom: String,
    size: String,
    scale: String,
}

#[derive(Debug, Serialize)]
struct ManifestInfo {
    version: u32,
    author: String,
}

/// Runs the full iOS generation pass.
pub(crate) async fn generate(
    compositor: &Arc<Compositor>,
    request: &SourceRequest,
    sizes: &ResolvedSizeSet,
    output_root: &Path,
) -> Result<GenerationResult> {
    let platform = Platform::Ios;

    let source = request
        .load(platform)
        .map_err(|e| e.at_stage(platform, Stage::Validating))?;

    // One compositor invocation builds the flattened seed; all size renders
    // afterwards treat it as an ordinary single-image source.
    let seed = match source {
        IconSource::Layered(layers) => {
            log::debug!("flattening layered source into a {IOS_SEED_SIZE}px seed");
            IconSource::Flat(DynamicImage::ImageRgba8(compositor.flatten(
                &layers,
                IOS_SEED_SIZE,
                platform,
            )))
        }
        flat @ IconSource::Flat(_) => flat,
    };

    let platform_root = output_root.join(platform.short_name());
    let files = render_batch(
        Arc::clone(compositor),
        Arc::new(seed),
        sizes.specs.clone(),
        platform,
        &platform_root,
    )
    .await
    .map_err(|e| e.at_stage(platform, Stage::Rendering))?;

    let manifest = build_manifest(&sizes.specs);
    let manifest_path = platform_root.join("Contents.json");
    let json = serde_json::to_vec_pretty(&manifest)
        .map_err(Error::Json)
        .context("serializing Contents.json")
        .map_err(|e| e.at_stage(platform, Stage::WritingMetadata))?;
    fs::write_file(&manifest_path, &json)
        .await
        .map_err(|e| e.at_stage(platform, Stage::WritingMetadata))?;

    log::info!(
        "generated {} iOS icons under {}",
        files.len(),
        platform_root.display()
    );

    Ok(GenerationResult {
        platform,
        output_root: platform_root,
        files,
        metadata_files: vec![manifest_path],
    })
}

// Manifest entries keep the resolved order: defaults first, additions last.
fn build_manifest(specs: &[IconSpec]) -> Manifest {
    let images = specs
        .iter()
        .map(|spec| match &spec.label {
            SizeLabel::Points { size, scale, idiom } => ManifestImage {
                filename: spec.filename.clone(),
                idiom: idiom.as_str().to_string(),
                size: size.clone(),
                scale: scale.clone(),
            },
            SizeLabel::Custom { scale } => {
                let divisor = scale
                    .strip_suffix('x')
                    .and_then(|n| n.parse::<u32>().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(1);
                ManifestImage {
                    filename: spec.filename.clone(),
                    idiom: "universal".to_string(),
                    size: format!("{}x{}", spec.width_px / divisor, spec.height_px / divisor),
                    scale: scale.clone(),
                }
            }
            // Density labels never reach the iOS generator.
            SizeLabel::Density { .. } => ManifestImage {
                filename: spec.filename.clone(),
                idiom: "universal".to_string(),
                size: format!("{}x{}", spec.width_px, spec.height_px),
                scale: "1x".to_string(),
            },
        })
        .collect();

    Manifest {
        images,
        info: ManifestInfo {
            version: MANIFEST_VERSION,
            author: env!("CARGO_PKG_NAME").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog::SizeCatalog;

    #[test]
    fn manifest_covers_every_spec_in_order() {
        let catalog = SizeCatalog::of(Platform::Ios);
        let manifest = build_manifest(&catalog.defaults);
        assert_eq!(manifest.images.len(), 19);
        assert_eq!(manifest.info.version, 1);

        let first = &manifest.images[0];
        assert_eq!(first.filename, "AppIcon-20x20@2x.png");
        assert_eq!(first.idiom, "iphone");
        assert_eq!(first.size, "20x20");
        assert_eq!(first.scale, "2x");

        let marketing = manifest.images.last().expect("marketing entry");
        assert_eq!(marketing.idiom, "ios-marketing");
        assert_eq!(marketing.size, "1024x1024");
        assert_eq!(marketing.scale, "1x");
    }

    #[test]
    fn custom_entries_report_logical_size_from_scale() {
        let spec = IconSpec {
            width_px: 120,
            height_px: 120,
            label: SizeLabel::Custom { scale: "2x".into() },
            role: crate::generator::catalog::Role::Flat,
            filename: "Extra.png".into(),
            subpath: "Extra.png".into(),
        };
        let manifest = build_manifest(std::slice::from_ref(&spec));
        assert_eq!(manifest.images[0].size, "60x60");
        assert_eq!(manifest.images[0].scale, "2x");
        assert_eq!(manifest.images[0].idiom, "universal");
    }
}
