//! Sequential dispatch of a block event to several handlers.
//!
//! Handlers run in registration order and their findings are concatenated
//! in that order. The first handler error aborts the run.

use tracing::{debug, info};

use crate::error::{AgentError, AgentResult};
use crate::event::BlockEvent;
use crate::finding::Finding;
use crate::handler::HandleBlock;

/// Ordered collection of block handlers.
#[derive(Default)]
pub struct BlockHandlerRunner {
    handlers: Vec<Box<dyn HandleBlock>>,
}

impl BlockHandlerRunner {
    /// Create a runner with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler and return the runner, for chained construction.
    #[must_use]
    pub fn with_handler(mut self, handler: impl HandleBlock + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Add a handler after the ones already registered.
    pub fn register(&mut self, handler: impl HandleBlock + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler over `event` and collect their findings.
    ///
    /// # Errors
    ///
    /// Returns a handler error if no handler is registered, or the first
    /// error any handler returns.
    pub fn run(&self, event: &BlockEvent) -> AgentResult<Vec<Finding>> {
        if self.handlers.is_empty() {
            return Err(AgentError::handler("no block handlers found", None));
        }

        let mut findings = Vec::new();
        for (index, handler) in self.handlers.iter().enumerate() {
            let produced = handler.handle_block(event)?;
            debug!(handler = index, findings = produced.len(), "Handler finished");
            findings.extend(produced);
        }

        info!(
            block_number = event.block_number(),
            block_hash = %event.block_hash(),
            network = %event.network,
            findings = findings.len(),
            "{} findings for block {}",
            findings.len(),
            event.block_hash()
        );

        Ok(findings)
    }
}

impl std::fmt::Debug for BlockHandlerRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHandlerRunner")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
