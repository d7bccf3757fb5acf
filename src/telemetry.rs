//! Log output and workflow annotations.
//!
//! Diagnostics go through `tracing` to stderr. Run outcomes are also
//! recorded as [`TelemetryEvent`]s; under GitHub Actions these become
//! workflow commands so they show up as annotations on the run.

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "SHORTY_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global `tracing` subscriber writing to stderr.
///
/// The filter comes from `SHORTY_LOG` (e.g. `shorty=debug`) and defaults to
/// `info`. Calling this more than once leaves the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _already_installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Whether the process runs as a GitHub Actions step.
#[must_use]
pub fn running_in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

/// An outcome worth surfacing beyond the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// A short link was published.
    LinkPublished {
        /// Short URL.
        from: String,
        /// Target URL.
        to: String,
    },
    /// Floating tags were moved to a build commit.
    ReleaseTagged {
        /// Released version.
        version: String,
        /// Tags moved.
        tags: Vec<String>,
    },
    /// The run failed.
    RunFailed {
        /// Error message.
        message: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: &TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: &TelemetryEvent) {}
}

/// Writes events to stdout as GitHub Actions workflow commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowCommandSink;

impl TelemetrySink for WorkflowCommandSink {
    fn record(&self, event: &TelemetryEvent) {
        let mut stdout = io::stdout().lock();
        emit_workflow_command(&mut stdout, event);
    }
}

/// Writes `event` to `writer`; a failed write is logged and dropped so a
/// closed stdout never aborts the run.
fn emit_workflow_command<W: Write>(writer: &mut W, event: &TelemetryEvent) {
    if let Err(error) = write_workflow_command(writer, event) {
        tracing::debug!("failed to write workflow command: {error}");
    }
}

/// Picks the sink for the current environment.
#[must_use]
pub fn sink_for_environment() -> Box<dyn TelemetrySink> {
    if running_in_actions() {
        Box::new(WorkflowCommandSink)
    } else {
        Box::new(NoopTelemetrySink)
    }
}

/// Escapes a workflow command message.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Writes `event` as a single workflow command line.
///
/// # Errors
///
/// Returns the writer's I/O error.
pub fn write_workflow_command<W: Write>(writer: &mut W, event: &TelemetryEvent) -> io::Result<()> {
    let (command, message) = match event {
        TelemetryEvent::LinkPublished { from, to } => ("notice", format!("{from} now points to {to}")),
        TelemetryEvent::ReleaseTagged { version, tags } => (
            "notice",
            format!("released v{version} as {}", tags.join(", ")),
        ),
        TelemetryEvent::RunFailed { message } => ("error", message.clone()),
    };
    writeln!(writer, "::{command}::{}", escape_data(&message))
}
