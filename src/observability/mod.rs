//! Structured logging for agents and the `forta-agent` binary.
//!
//! Built on the tracing framework so agent authors get filtering and
//! machine-parseable output without extra setup.
//!
//! # Environment Configuration
//!
//! ```bash
//! # Set log level for all modules
//! RUST_LOG=debug forta-agent block ./block.json
//!
//! # Enable JSON output for production
//! LOG_JSON=true forta-agent block ./block.json
//!
//! # Write logs to file with daily rotation
//! LOG_FILE=./logs/agent.log forta-agent block ./block.json
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{AgentError, AgentResult};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "forta_agent=info,warn";

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_level` - Optional level override (e.g., "debug"). `RUST_LOG` wins if set.
/// * `log_file` - Optional file path for JSON log output with daily rotation.
/// * `json_output` - JSON console output instead of the pretty format.
///
/// The returned guard flushes the file writer on drop; keep it alive for as
/// long as logs should be written. It is `None` when no file is configured.
///
/// # Errors
///
/// Returns a config error if the log directory cannot be created or a
/// global subscriber is already installed.
pub fn init_tracing(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    json_output: bool,
) -> AgentResult<Option<WorkerGuard>> {
    let env_filter = if let Ok(filter) = std::env::var("RUST_LOG") {
        EnvFilter::new(filter)
    } else if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    };

    let console_layer = if json_output {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(ref path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgentError::config(
                    format!("unable to create log directory {}", parent.display()),
                    Some(Box::new(e)),
                )
            })?;
        }

        let file_appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name().unwrap_or_else(|| OsStr::new("agent.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // File always uses JSON
        let layer = fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed();

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AgentError::config("tracing already initialized", Some(Box::new(e))))?;

    info!(
        json_output,
        file_logging = log_file.is_some(),
        "Tracing initialized"
    );

    Ok(guard)
}

/// Initialize tracing for tests, writing through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
