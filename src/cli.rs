//! Command-line interface for running agents locally.
//!
//! # Commands
//!
//! - `block`: Run the starter agent against a block read from a JSON file
//! - `networks`: List supported networks and their chain IDs
//! - `config`: Show the resolved agent configuration
//!
//! # Example
//!
//! ```bash
//! # Block as returned by eth_getBlockByNumber
//! forta-agent block ./block.json --network polygon
//!
//! # Replay the same block as a reorg with a lower gas threshold
//! forta-agent block ./block.json --reorg --threshold 500000
//! ```

use crate::block::Block;
use crate::config::Config;
use crate::error::{AgentError, AgentResult};
use crate::event::{BlockEvent, EventType};
use crate::finding::{Finding, FindingSeverity};
use crate::network::Network;
use crate::runner::BlockHandlerRunner;
use crate::starter::{HighGasUsedHandler, DEFAULT_GAS_THRESHOLD};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Forta agent runner
#[derive(Parser, Debug)]
#[command(name = "forta-agent")]
#[command(about = "Run Forta block agents against local block data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run block handlers against a block read from a JSON file
    Block {
        /// JSON file holding a block or a full block event
        file: PathBuf,

        /// Network slug or chain ID (default: the event's network, else mainnet)
        #[arg(short, long)]
        network: Option<Network>,

        /// Deliver the block as a reorg event
        #[arg(long)]
        reorg: bool,

        /// Gas used above which the starter agent reports the block
        #[arg(short, long, default_value_t = DEFAULT_GAS_THRESHOLD)]
        threshold: u128,
    },

    /// List supported networks
    Networks,

    /// Show the resolved configuration
    Config,
}

/// Execute a parsed command.
///
/// The configuration is passed as loaded. Only the `config` command fails on
/// a configuration error; the other commands log it and carry on.
///
/// # Errors
///
/// Returns an error if:
/// - The block file cannot be read or decoded
/// - A handler fails
/// - The `config` command is run with an unusable configuration
pub fn run(cli: Cli, config: AgentResult<Config>) -> AgentResult<()> {
    match &config {
        Ok(config) if config.from_file() => {
            debug!(path = %config.config_path().display(), "Loaded config file");
        }
        Ok(config) => {
            debug!(path = %config.config_path().display(), "No config file found, using defaults");
        }
        Err(e) => warn!(error = %e, "Configuration unavailable"),
    }

    match cli.command {
        Commands::Block {
            file,
            network,
            reorg,
            threshold,
        } => run_block_command(&file, network, reorg, threshold),
        Commands::Networks => {
            print_networks();
            Ok(())
        }
        Commands::Config => {
            print_config(&config?);
            Ok(())
        }
    }
}

/// Execute the block command.
fn run_block_command(
    file: &Path,
    network: Option<Network>,
    reorg: bool,
    threshold: u128,
) -> AgentResult<()> {
    let event = read_block_event(file, network, reorg)?;
    info!(
        block_number = event.block_number(),
        network = %event.network,
        event_type = ?event.event_type,
        "Running block handlers"
    );

    let runner = BlockHandlerRunner::new().with_handler(HighGasUsedHandler::new(threshold));
    let findings = runner.run(&event)?;

    print_findings(&event, &findings);
    Ok(())
}

/// Top-level keys that mark a file as a block event rather than a bare block.
const EVENT_KEYS: [&str; 7] = [
    "block",
    "type",
    "network",
    "blockHash",
    "blockNumber",
    "block_hash",
    "block_number",
];

/// Read a block event from a JSON file.
///
/// The file may hold either a block event (`{"type", "network", "block"}`,
/// or the top-level `blockHash`/`blockNumber` form) or a bare block such as
/// the `result` of `eth_getBlockByNumber`. The `network` override and `reorg`
/// flag are applied on top of whatever the file contains.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid block or block event.
pub fn read_block_event(
    file: &Path,
    network: Option<Network>,
    reorg: bool,
) -> AgentResult<BlockEvent> {
    let data = fs::read_to_string(file).map_err(|e| {
        AgentError::decoding(
            format!("unable to read block file {}", file.display()),
            Some(Box::new(e)),
        )
    })?;
    let value: serde_json::Value = serde_json::from_str(&data)?;

    let mut event = if EVENT_KEYS.iter().any(|key| value.get(key).is_some()) {
        debug!("Decoding file as block event");
        serde_json::from_value::<BlockEvent>(value)?
    } else {
        debug!("Decoding file as bare block");
        BlockEvent::new(EventType::Block, Network::default(), serde_json::from_value::<Block>(value)?)
    };

    if let Some(network) = network {
        event.network = network;
    }
    if reorg {
        event.event_type = EventType::Reorg;
    }

    Ok(event)
}

fn severity_label(severity: FindingSeverity) -> ColoredString {
    match severity {
        FindingSeverity::Critical | FindingSeverity::High => severity.name().red().bold(),
        FindingSeverity::Medium => severity.name().yellow().bold(),
        FindingSeverity::Low | FindingSeverity::Info => severity.name().cyan(),
        FindingSeverity::Unknown => severity.name().dimmed(),
    }
}

fn print_findings(event: &BlockEvent, findings: &[Finding]) {
    println!();
    println!(
        "{} {} {} {}",
        "Block".bold(),
        event.block_number().to_string().bright_white().bold(),
        "on".dimmed(),
        event.network.to_string().cyan()
    );
    println!("{} {}", "Hash:".dimmed(), event.block_hash());
    if event.event_type == EventType::Reorg {
        println!("{}", "Delivered as reorg".yellow());
    }
    println!();

    if findings.is_empty() {
        println!("{}", "No findings".green().bold());
        return;
    }

    println!("{}", format!("{} finding(s)", findings.len()).bold());
    for finding in findings {
        println!();
        println!(
            "[{}] {} ({})",
            severity_label(finding.severity),
            finding.name.bold(),
            finding.alert_id
        );
        println!("{finding}");
    }
}

fn print_networks() {
    println!("{}", "Supported networks".bold());
    for network in Network::ALL {
        println!("  {:<10} {}", network.name().cyan(), network.chain_id());
    }
}

fn print_config(config: &Config) {
    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Agent configuration".bold());
    println!("  {:<12} {}", "config file", config.config_path().display());
    println!(
        "  {:<12} {}",
        "agent id",
        config.agent_id().map_or_else(unset, ToString::to_string)
    );
    println!(
        "  {:<12} {}",
        "version",
        config.version().map_or_else(unset, ToString::to_string)
    );
    println!(
        "  {:<12} {}",
        "json-rpc",
        config
            .json_rpc_url()
            .map_or_else(|_| unset(), ToString::to_string)
    );
    println!("  {:<12} {}", "debug", config.debug());
}
