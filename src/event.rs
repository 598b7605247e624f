//! Block events delivered to agents.
//!
//! A [`BlockEvent`] pairs a [`Block`] with the network it was mined on and
//! an [`EventType`] telling the agent whether the block extends the chain or
//! replaces a previously delivered one after a reorg.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{AgentError, AgentResult};
use crate::network::Network;

/// Kind of block notification.
///
/// Serialized as its integer discriminant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum EventType {
    /// A new block on the canonical chain
    #[default]
    Block = 0,
    /// A block delivered again because the chain reorganized
    Reorg = 1,
}

impl TryFrom<u8> for EventType {
    type Error = AgentError;

    fn try_from(value: u8) -> AgentResult<Self> {
        match value {
            0 => Ok(Self::Block),
            1 => Ok(Self::Reorg),
            other => Err(AgentError::decoding(
                format!("invalid event type {other}"),
                None,
            )),
        }
    }
}

impl From<EventType> for u8 {
    fn from(event_type: EventType) -> Self {
        event_type as Self
    }
}

/// Notification of a new or reorganized block.
///
/// Missing keys default to a [`EventType::Block`] event on
/// [`Network::Mainnet`] carrying an empty block. Payloads that carry
/// `blockHash`/`blockNumber` (or `block_hash`/`block_number`) at the top
/// level fill in the block's hash and number when the block lacks them.
///
/// ```
/// use forta_agent::event::BlockEvent;
///
/// let event: BlockEvent =
///     serde_json::from_str(r#"{"blockHash": "0xab", "blockNumber": "0x10"}"#).unwrap();
/// assert_eq!(event.block_hash(), "0xab");
/// assert_eq!(event.block_number(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawBlockEvent")]
pub struct BlockEvent {
    /// Whether this is a new block or a reorg
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Network the block belongs to
    pub network: Network,

    /// The block itself
    pub block: Block,
}

/// Wire shape accepted when decoding a [`BlockEvent`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawBlockEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    network: Network,
    block: Option<Block>,
    #[serde(alias = "block_hash")]
    block_hash: Option<String>,
    #[serde(
        alias = "block_number",
        deserialize_with = "crate::block::quantity::deserialize_option"
    )]
    block_number: Option<u64>,
}

impl From<RawBlockEvent> for BlockEvent {
    fn from(raw: RawBlockEvent) -> Self {
        let mut block = raw.block.unwrap_or_default();
        if block.hash.is_empty() {
            if let Some(hash) = raw.block_hash {
                block.hash = hash;
            }
        }
        if block.number == 0 {
            if let Some(number) = raw.block_number {
                block.number = number;
            }
        }

        Self::new(raw.event_type, raw.network, block)
    }
}

impl BlockEvent {
    /// Create a block event.
    #[must_use]
    pub const fn new(event_type: EventType, network: Network, block: Block) -> Self {
        Self {
            event_type,
            network,
            block,
        }
    }

    /// Hash of the embedded block.
    #[must_use]
    pub fn block_hash(&self) -> &str {
        &self.block.hash
    }

    /// Number of the embedded block.
    #[must_use]
    pub const fn block_number(&self) -> u64 {
        self.block.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_default_is_block() {
        assert_eq!(EventType::default(), EventType::Block);
        assert_eq!(u8::from(EventType::Block), 0);
        assert_eq!(u8::from(EventType::Reorg), 1);
    }

    #[test]
    fn test_event_type_rejects_unknown_values() {
        assert_eq!(EventType::try_from(1).unwrap(), EventType::Reorg);
        assert!(EventType::try_from(2).is_err());
        assert!(serde_json::from_str::<EventType>("7").is_err());
    }

    #[test]
    fn test_block_accessors() {
        let block = Block {
            hash: "0xabc".to_string(),
            number: 42,
            ..Block::default()
        };
        let event = BlockEvent::new(EventType::Reorg, Network::Goerli, block.clone());

        assert_eq!(event.event_type, EventType::Reorg);
        assert_eq!(event.network, Network::Goerli);
        assert_eq!(event.block, block);
        assert_eq!(event.block_hash(), "0xabc");
        assert_eq!(event.block_number(), 42);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let event: BlockEvent = serde_json::from_str(r#"{"block": {"number": 7}}"#).unwrap();
        assert_eq!(event.event_type, EventType::Block);
        assert_eq!(event.network, Network::Mainnet);
        assert_eq!(event.block_number(), 7);
    }

    #[test]
    fn test_top_level_hash_and_number_fill_missing_block() {
        let event: BlockEvent =
            serde_json::from_str(r#"{"type": 1, "blockHash": "0xfe", "blockNumber": 99}"#)
                .unwrap();
        assert_eq!(event.event_type, EventType::Reorg);
        assert_eq!(event.block_hash(), "0xfe");
        assert_eq!(event.block_number(), 99);

        let event: BlockEvent =
            serde_json::from_str(r#"{"block_hash": "0xfd", "block_number": "0x64"}"#).unwrap();
        assert_eq!(event.block_hash(), "0xfd");
        assert_eq!(event.block_number(), 100);
    }

    #[test]
    fn test_embedded_block_wins_over_top_level_keys() {
        let json = r#"{
            "blockHash": "0x01",
            "blockNumber": 1,
            "block": {"hash": "0x02", "number": 2}
        }"#;
        let event: BlockEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.block_hash(), "0x02");
        assert_eq!(event.block_number(), 2);
    }

    #[test]
    fn test_full_event_survives_json() {
        let block = Block {
            difficulty: "0x0".to_string(),
            extra_data: "0x01".to_string(),
            gas_limit: "0x1c9c380".to_string(),
            gas_used: "0xe4e1c0".to_string(),
            hash: "0xaa01".to_string(),
            logs_bloom: "0x00".to_string(),
            miner: "0x9522".to_string(),
            mix_hash: "0xaa02".to_string(),
            nonce: "0x0000000000000000".to_string(),
            number: 115_000_000,
            parent_hash: "0xaa00".to_string(),
            receipts_root: "0xaa03".to_string(),
            sha3_uncles: "0xaa04".to_string(),
            size: "0x2f9c1".to_string(),
            state_root: "0xaa05".to_string(),
            timestamp: 1_705_173_443,
            total_difficulty: "0xc70d815d562d3cfa955".to_string(),
            transactions: vec!["0x01".to_string(), "0x02".to_string()],
            transactions_root: "0xaa06".to_string(),
            uncles: vec!["0x03".to_string()],
        };
        let event = BlockEvent::new(EventType::Reorg, Network::Optimism, block);

        let json = serde_json::to_string(&event).unwrap();
        let parsed: BlockEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_serialized_shape() {
        let event = BlockEvent::new(EventType::Reorg, Network::Bsc, Block::default());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], 1);
        assert_eq!(value["network"], 56);
        assert!(value["block"].is_object());
    }
}
