//! Releasing a pushed version tag.

use camino::Utf8Path;

use crate::config::ShortyConfig;
use crate::error::RunError;
use crate::github::OctocrabRepositoryGateway;
use crate::release::{ReleaseTagger, ReleaseVersion, ReleasedBuild};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Commits the build output in `workspace` on top of the pushed tag and
/// moves the floating tags to it.
///
/// The pushed ref is validated before any client is built.
///
/// # Errors
///
/// Returns [`RunError::Release`] for an invalid tag, missing build outputs
/// or a failed remote step, and [`RunError::GitHub`] for missing
/// configuration.
pub async fn run(
    config: &ShortyConfig,
    workspace: &Utf8Path,
    telemetry: &dyn TelemetrySink,
) -> Result<ReleasedBuild, RunError> {
    let git_ref = config.resolve_git_ref()?;
    ReleaseVersion::from_ref(&git_ref)?;
    let sha = config.resolve_sha()?;
    let repository = config.resolve_repository()?;
    let token = config.resolve_token()?;
    let gateway = OctocrabRepositoryGateway::for_token(&token, &repository)?;

    let released = ReleaseTagger::new(&gateway, &repository)
        .release(&git_ref, &sha, workspace)
        .await?;

    let tags: Vec<String> = released
        .tags
        .iter()
        .map(|tag| tag.name().to_owned())
        .collect();
    tracing::info!("moved {} to {}", tags.join(", "), released.commit);
    telemetry.record(&TelemetryEvent::ReleaseTagged {
        version: released.version.to_string(),
        tags,
    });
    Ok(released)
}
