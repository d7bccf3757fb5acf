//! Operation mode handlers.
//!
//! - [`shorten_issue`]: turn the labelled issue of an `issues` event into a
//!   short link
//! - [`release`]: commit the build output and move the floating tags
//!
//! Both read their inputs from [`ShortyConfig`] and report outcomes to a
//! [`TelemetrySink`].

use camino::Utf8Path;

use crate::config::{OperationMode, ShortyConfig};
use crate::error::RunError;
use crate::telemetry::TelemetrySink;

pub mod release;
pub mod shorten_issue;

/// Runs the mode selected by `config`.
///
/// Release builds are read from `workspace`.
///
/// # Errors
///
/// Returns [`RunError`] from the selected handler.
pub async fn run(
    config: &ShortyConfig,
    workspace: &Utf8Path,
    telemetry: &dyn TelemetrySink,
) -> Result<(), RunError> {
    match config.operation_mode() {
        OperationMode::Release => {
            release::run(config, workspace, telemetry).await?;
        }
        OperationMode::ShortenIssue => {
            shorten_issue::run(config, telemetry).await?;
        }
        OperationMode::Skip => {
            let event = config.resolve_event_name();
            tracing::info!(
                "nothing to do for event {}",
                event.as_deref().unwrap_or("<none>")
            );
        }
    }
    Ok(())
}
