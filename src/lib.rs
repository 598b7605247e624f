//! # Forta Agent SDK
//!
//! Types and contracts for writing Forta detection agents in Rust.
//!
//! An agent receives a [`BlockEvent`](event::BlockEvent) for every new or
//! reorganized block on a [`Network`](network::Network), inspects the
//! embedded [`Block`](block::Block), and reports zero or more
//! [`Finding`](finding::Finding)s by implementing
//! [`HandleBlock`](handler::HandleBlock).
//!
//! ## Layout
//!
//! 1. **Data types** ([`block`], [`event`], [`network`], [`finding`]) - Plain value records
//! 2. **Contract** ([`handler`]) - The single-method block handler trait
//! 3. **Runner** ([`runner`]) - Sequential dispatch to several handlers
//! 4. **Starter agent** ([`starter`]) - High gas usage detector, a template for new agents
//! 5. **Ambient** ([`config`], [`error`], [`observability`], [`cli`]) - Config file, errors, logging, CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use forta_agent::prelude::*;
//!
//! let agent = |event: &BlockEvent| -> AgentResult<Vec<Finding>> {
//!     if event.event_type != EventType::Reorg {
//!         return Ok(Vec::new());
//!     }
//!     Ok(vec![Finding::new(
//!         "Reorg",
//!         format!("Block {} was reorganized", event.block_number()),
//!         "REORG-1",
//!         FindingSeverity::Low,
//!         FindingType::Info,
//!     )])
//! };
//!
//! let runner = BlockHandlerRunner::new().with_handler(agent);
//! let event = BlockEvent::new(EventType::Reorg, Network::Mainnet, Block::default());
//! assert_eq!(runner.run(&event)?.len(), 1);
//! # Ok::<(), AgentError>(())
//! ```
//!
//! ## Using the CLI
//!
//! ```bash
//! forta-agent block ./block.json --network mainnet
//! forta-agent networks
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`error::AgentResult<T>`](error::AgentResult).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod finding;
pub mod handler;
pub mod network;
pub mod observability;
pub mod runner;
pub mod starter;

/// Re-exports of the types every agent needs.
pub mod prelude {
    pub use crate::block::Block;
    pub use crate::error::{AgentError, AgentResult};
    pub use crate::event::{BlockEvent, EventType};
    pub use crate::finding::{Finding, FindingSeverity, FindingType};
    pub use crate::handler::HandleBlock;
    pub use crate::network::Network;
    pub use crate::runner::BlockHandlerRunner;
}
