//! Android icon set generation: per-density mipmap tree and adaptive
//! descriptors.
//!
//! Unlike iOS, Android never flattens a layered request: foreground,
//! background, and monochrome render as independent per-density outputs and
//! the OS composites them at runtime. The legacy `ic_launcher` /
//! `ic_launcher_round` rasters are still emitted for pre-adaptive devices.

use crate::generator::GenerationResult;
use crate::generator::catalog::Role;
use crate::generator::compositor::Compositor;
use crate::generator::customize::ResolvedSizeSet;
use crate::generator::error::{Result, Stage};
use crate::generator::platform::Platform;
use crate::generator::render::render_batch;
use crate::generator::resources::SourceRequest;
use crate::generator::fs;
use std::path::Path;
use std::sync::Arc;

/// Density-independent folder holding the adaptive-icon descriptors.
const DESCRIPTOR_DIR: &str = "mipmap-anydpi-v26";

/// Runs the full Android generation pass.
pub(crate) async fn generate(
    compositor: &Arc<Compositor>,
    request: &SourceRequest,
    sizes: &ResolvedSizeSet,
    output_root: &Path,
) -> Result<GenerationResult> {
    let platform = Platform::Android;

    let source = request
        .load(platform)
        .map_err(|e| e.at_stage(platform, Stage::Validating))?;

    let platform_root = output_root.join(platform.short_name());
    let files = render_batch(
        Arc::clone(compositor),
        Arc::new(source),
        sizes.specs.clone(),
        platform,
        &platform_root,
    )
    .await
    .map_err(|e| e.at_stage(platform, Stage::Rendering))?;

    let mut metadata_files = Vec::new();
    let has_foreground = sizes.specs.iter().any(|s| s.role == Role::Foreground);
    if sizes.adaptive && has_foreground {
        let with_monochrome = sizes.specs.iter().any(|s| s.role == Role::Monochrome);
        let xml = descriptor_xml(with_monochrome);
        for name in ["ic_launcher.xml", "ic_launcher_round.xml"] {
            let path = platform_root.join(DESCRIPTOR_DIR).join(name);
            fs::write_file(&path, xml.as_bytes())
                .await
                .map_err(|e| e.at_stage(platform, Stage::WritingMetadata))?;
            metadata_files.push(path);
        }
    }

    log::info!(
        "generated {} Android icons under {}",
        files.len(),
        platform_root.display()
    );

    Ok(GenerationResult {
        platform,
        output_root: platform_root,
        files,
        metadata_files,
    })
}

// Both descriptors reference the layer roles by resource name; the
// monochrome element is only present when monochrome layers were rendered.
fn descriptor_xml(with_monochrome: bool) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <adaptive-icon xmlns:android=\"http://schemas.android.com/apk/res/android\">\n\
         \x20   <background android:drawable=\"@mipmap/ic_launcher_background\"/>\n\
         \x20   <foreground android:drawable=\"@mipmap/ic_launcher_foreground\"/>\n",
    );
    if with_monochrome {
        xml.push_str(
            "    <monochrome android:drawable=\"@mipmap/ic_launcher_monochrome\"/>\n",
        );
    }
    xml.push_str("</adaptive-icon>\n");
    xml
}
