//! Starter agent: flags blocks that burn a lot of gas.
//!
//! This is the smallest useful [`HandleBlock`] implementation and the one
//! the `forta-agent block` command runs. Copy it as a template for new agents.

use tracing::debug;

use crate::block::parse_quantity;
use crate::error::AgentResult;
use crate::event::BlockEvent;
use crate::finding::{Finding, FindingSeverity, FindingType};
use crate::handler::HandleBlock;

/// Gas used above which a block is reported.
pub const DEFAULT_GAS_THRESHOLD: u128 = 1_000_000;

/// Alert ID attached to high gas findings.
pub const HIGH_GAS_ALERT_ID: &str = "FORTA-1";

/// Reports a block whose gas used exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighGasUsedHandler {
    threshold: u128,
}

impl HighGasUsedHandler {
    /// Create a handler with a custom threshold.
    #[must_use]
    pub const fn new(threshold: u128) -> Self {
        Self { threshold }
    }

    /// The configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> u128 {
        self.threshold
    }
}

impl Default for HighGasUsedHandler {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_THRESHOLD)
    }
}

impl HandleBlock for HighGasUsedHandler {
    fn handle_block(&self, event: &BlockEvent) -> AgentResult<Vec<Finding>> {
        let gas_used = parse_quantity(&event.block.gas_used)?;
        debug!(block_number = event.block_number(), gas_used, threshold = self.threshold, "Checking block gas");

        if gas_used <= self.threshold {
            return Ok(Vec::new());
        }

        Ok(vec![Finding::new(
            "High Gas Used",
            format!("Gas Used: {gas_used}"),
            HIGH_GAS_ALERT_ID,
            FindingSeverity::Medium,
            FindingType::Suspicious,
        )
        .with_metadata_entry("gasUsed", gas_used.to_string())
        .with_metadata_entry("blockNumber", event.block_number().to_string())])
    }
}
