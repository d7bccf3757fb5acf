//! Shortening the issue carried by an `issues` event.

use crate::config::ShortyConfig;
use crate::error::RunError;
use crate::event::IssuesEvent;
use crate::github::OctocrabRepositoryGateway;
use crate::shortener::{ShortenOutcome, ShortenWorkflow};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Reads the event payload and handles it against the configured
/// repository.
///
/// # Errors
///
/// Returns [`RunError::GitHub`] when the repository, token or payload path
/// is not configured, [`RunError::Event`] when the payload cannot be read,
/// and [`RunError::Shorten`] when the protocol fails.
pub async fn run(
    config: &ShortyConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<ShortenOutcome, RunError> {
    let repository = config.resolve_repository()?;
    let event = IssuesEvent::read(&config.resolve_event_path()?)?;
    let token = config.resolve_token()?;
    let gateway = OctocrabRepositoryGateway::for_token(&token, &repository)?;

    let settings = config.shorten_settings()?;
    let outcome = ShortenWorkflow::new(&gateway, &repository, settings)
        .handle(&event)
        .await?;

    match &outcome {
        ShortenOutcome::Published { request, revision } => {
            tracing::info!(
                "published {} at {} for issue {}",
                request.entry.from,
                revision.commit,
                request.issue
            );
            telemetry.record(&TelemetryEvent::LinkPublished {
                from: request.entry.from.to_string(),
                to: request.entry.to.to_string(),
            });
        }
        ShortenOutcome::Ignored(reason) => {
            tracing::info!("event ignored: {reason}");
        }
    }
    Ok(outcome)
}
