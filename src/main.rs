//! CLI entry point for running Forta agents locally.
//!
//! # Flow
//!
//! ```text
//! main.rs (argument parsing, Config + tracing initialization)
//!     ↓
//! CLI Layer (src/cli.rs)
//!     ↓
//! 1. Event Layer (src/event.rs)      → Decode block / block event JSON
//! 2. Runner (src/runner.rs)          → Dispatch to block handlers
//! 3. Handlers (src/starter.rs)       → Produce findings
//! 4. CLI Layer (output)              → Display formatted findings
//! ```
//!
//! All errors bubble up via `AgentResult<T>`.

use clap::Parser;
use forta_agent::cli::{self, Cli};
use forta_agent::{config::Config, observability};
use tracing::error;

/// Entry point for the agent runner.
///
/// Parses arguments first so `--help` and `--version` work without a usable
/// config. Then loads configuration, initializes tracing (`RUST_LOG`,
/// `LOG_JSON`, `LOG_FILE`; `debug: true` in the config file raises the
/// default level), and delegates to the CLI module.
fn main() {
    let cli = Cli::parse();
    let config = Config::from_env();

    let log_level = std::env::var("RUST_LOG").ok().or_else(|| {
        config
            .as_ref()
            .is_ok_and(Config::debug)
            .then(|| "forta_agent=debug,warn".to_string())
    });
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let _log_guard = match observability::init_tracing(log_level, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, config) {
        error!(error = %e, "Application error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
