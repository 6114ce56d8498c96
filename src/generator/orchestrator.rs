//! Generation orchestration across platforms.
//!
//! The orchestrator resolves every requested platform's size set up front —
//! customization problems are global and block the whole request before any
//! rendering starts — then runs each platform generator independently, so
//! one platform's failure never aborts its siblings. Callers receive one
//! outcome per platform and see partial success explicitly.

use crate::generator::GenerationResult;
use crate::generator::compositor::{Compositor, CompositorConfig};
use crate::generator::customize::{self, CustomizationRequest, ResolvedSizeSet};
use crate::generator::error::{Error, Result};
use crate::generator::platform::{Platform, android, ios};
use crate::generator::resources::SourceRequest;
use std::path::PathBuf;
use std::sync::Arc;

/// The result of one platform's generation attempt.
#[derive(Debug)]
pub struct PlatformOutcome {
    /// Platform this outcome belongs to.
    pub platform: Platform,
    /// A populated [`GenerationResult`] or the error that aborted the
    /// platform, tagged with the failing stage.
    pub result: Result<GenerationResult>,
}

impl PlatformOutcome {
    /// Whether the platform completed successfully.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Top-level entry point: resolves size sets, dispatches platform
/// generators, and aggregates per-platform results.
///
/// # Examples
///
/// ```no_run
/// use iconsmith::generator::orchestrator::Orchestrator;
/// use iconsmith::generator::compositor::CompositorConfig;
/// use iconsmith::generator::customize::CustomizationRequest;
/// use iconsmith::generator::platform::Platform;
/// use iconsmith::generator::resources::SourceRequest;
///
/// # async fn example() -> iconsmith::generator::error::Result<()> {
/// let orchestrator = Orchestrator::new(
///     CompositorConfig::default(),
///     CustomizationRequest::default(),
///     "icons",
/// );
/// let source = SourceRequest::Flat { path: "logo.png".into() };
/// let outcomes = orchestrator.generate(&source, &Platform::all()).await?;
/// for outcome in &outcomes {
///     println!("{}: {}", outcome.platform, outcome.is_success());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    compositor: Arc<Compositor>,
    request: CustomizationRequest,
    output_root: PathBuf,
}

impl Orchestrator {
    /// Creates an orchestrator writing below `output_root`.
    pub fn new(
        config: CompositorConfig,
        request: CustomizationRequest,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compositor: Arc::new(Compositor::new(config)),
            request,
            output_root: output_root.into(),
        }
    }

    /// Generates icon sets for every platform in `platforms`.
    ///
    /// Returns `Err` only for request-level validation failures, which are
    /// aggregated across all platforms and reported before any work starts.
    /// Everything after that point is per-platform: the returned outcomes
    /// carry each platform's success or failure independently.
    pub async fn generate(
        &self,
        source: &SourceRequest,
        platforms: &[Platform],
    ) -> Result<Vec<PlatformOutcome>> {
        let adaptive = source.is_layered();

        let mut resolved: Vec<(Platform, ResolvedSizeSet)> = Vec::new();
        let mut problems = Vec::new();
        for &platform in platforms {
            match customize::resolve(platform, &platform.catalog(), &self.request, adaptive) {
                Ok(sizes) => resolved.push((platform, sizes)),
                Err(e) => problems.extend(e.problems),
            }
        }
        if !problems.is_empty() {
            return Err(Error::Validation(customize::ValidationError { problems }));
        }

        let mut outcomes = Vec::new();
        for (platform, sizes) in resolved {
            log::debug!("generating {platform} set: {} sizes", sizes.specs.len());
            let result = self.run_platform(source, platform, &sizes).await;
            if let Err(e) = &result {
                log::warn!("{platform} generation failed: {e}");
            }
            outcomes.push(PlatformOutcome { platform, result });
        }
        Ok(outcomes)
    }

    async fn run_platform(
        &self,
        source: &SourceRequest,
        platform: Platform,
        sizes: &ResolvedSizeSet,
    ) -> Result<GenerationResult> {
        match platform {
            Platform::Ios => ios::generate(&self.compositor, source, sizes, &self.output_root).await,
            Platform::Android => {
                android::generate(&self.compositor, source, sizes, &self.output_root).await
            }
        }
    }
}
