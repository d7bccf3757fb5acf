//! Shorty entrypoint for GitHub Actions runs.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use shorty::telemetry::{self, TelemetryEvent, TelemetrySink};
use shorty::{GitHubError, RunError, ShortyConfig};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_logging();
    let sink = telemetry::sink_for_environment();

    match run(sink.as_ref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            sink.record(&TelemetryEvent::RunFailed {
                message: error.to_string(),
            });
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(sink: &dyn TelemetrySink) -> Result<(), RunError> {
    let config = load_config()?;
    shorty::cli::run(&config, Utf8Path::new("."), sink).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GitHubError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ShortyConfig, GitHubError> {
    ShortyConfig::load().map_err(|error| GitHubError::Configuration {
        message: error.to_string(),
    })
}
