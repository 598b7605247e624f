//! The block handler contract implemented by detection agents.
//!
//! ## Example
//!
//! ```
//! use forta_agent::prelude::*;
//!
//! struct EmptyBlockAgent;
//!
//! impl HandleBlock for EmptyBlockAgent {
//!     fn handle_block(&self, event: &BlockEvent) -> AgentResult<Vec<Finding>> {
//!         if !event.block.transactions.is_empty() {
//!             return Ok(Vec::new());
//!         }
//!         Ok(vec![Finding::new(
//!             "Empty Block",
//!             format!("Block {} has no transactions", event.block_number()),
//!             "EMPTY-1",
//!             FindingSeverity::Info,
//!             FindingType::Info,
//!         )])
//!     }
//! }
//!
//! let event = BlockEvent::new(EventType::Block, Network::Mainnet, Block::default());
//! assert_eq!(EmptyBlockAgent.handle_block(&event)?.len(), 1);
//! # Ok::<(), AgentError>(())
//! ```

use crate::error::AgentResult;
use crate::event::BlockEvent;
use crate::finding::Finding;

/// Turns one block event into zero or more findings.
///
/// No purity or idempotence is assumed; an implementation may keep state
/// behind interior mutability or call out to other services.
pub trait HandleBlock {
    /// Inspect a block event and report findings.
    ///
    /// # Errors
    ///
    /// Implementations return an error when they cannot evaluate the event.
    fn handle_block(&self, event: &BlockEvent) -> AgentResult<Vec<Finding>>;
}

impl<F> HandleBlock for F
where
    F: Fn(&BlockEvent) -> AgentResult<Vec<Finding>>,
{
    fn handle_block(&self, event: &BlockEvent) -> AgentResult<Vec<Finding>> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::event::EventType;
    use crate::finding::{FindingSeverity, FindingType};
    use crate::network::Network;

    #[test]
    fn test_closure_is_a_handler() {
        let handler = |event: &BlockEvent| -> AgentResult<Vec<Finding>> {
            Ok(vec![Finding::new(
                "Seen",
                event.block_hash(),
                "SEEN-1",
                FindingSeverity::Info,
                FindingType::Info,
            )])
        };

        let block = Block {
            hash: "0xfeed".to_string(),
            ..Block::default()
        };
        let event = BlockEvent::new(EventType::Block, Network::Mainnet, block);
        let findings = handler.handle_block(&event).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].description, "0xfeed");
    }

    #[test]
    fn test_handler_may_return_nothing() {
        let handler = |_: &BlockEvent| -> AgentResult<Vec<Finding>> { Ok(Vec::new()) };
        let findings = handler.handle_block(&BlockEvent::default()).unwrap();
        assert!(findings.is_empty());
    }
}
