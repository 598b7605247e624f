//! Block records handed to block handlers.
//!
//! [`Block`] mirrors the block object returned by `eth_getBlockByNumber`:
//! hashes and quantities stay in their textual (`0x` hex) form, while the
//! block number and timestamp are plain integers. Those two are decoded from
//! either a JSON number or a node's `0x` hex quantity. Nothing is validated;
//! the record carries whatever the node reported.
//!
//! ## Example
//!
//! ```
//! use forta_agent::block::Block;
//!
//! let json = r#"{
//!     "number": 19000000,
//!     "hash": "0xabc",
//!     "parentHash": "0xdef",
//!     "gasUsed": "0x1c9c380",
//!     "timestamp": 1705173443,
//!     "transactions": ["0x01", "0x02"]
//! }"#;
//!
//! let block: Block = serde_json::from_str(json)?;
//! assert_eq!(block.number, 19_000_000);
//! assert_eq!(block.transactions.len(), 2);
//! assert!(block.uncles.is_empty());
//!
//! let from_node: Block = serde_json::from_str(r#"{"number": "0x121eac0", "timestamp": "0x65a2b1c3"}"#)?;
//! assert_eq!(from_node.number, 19_000_000);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};

/// A mined block.
///
/// Serialized with the JSON-RPC camelCase keys. Deserialization also
/// accepts snake_case keys, and any missing key takes its default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    /// Block difficulty
    pub difficulty: String,

    /// Extra data field set by the miner
    #[serde(alias = "extra_data")]
    pub extra_data: String,

    /// Gas limit (hex quantity)
    #[serde(alias = "gas_limit")]
    pub gas_limit: String,

    /// Gas used by all transactions in the block (hex quantity)
    #[serde(alias = "gas_used")]
    pub gas_used: String,

    /// Block hash
    pub hash: String,

    /// Bloom filter for the logs of the block
    #[serde(alias = "logs_bloom")]
    pub logs_bloom: String,

    /// Beneficiary address
    pub miner: String,

    /// Mix hash
    #[serde(alias = "mix_hash")]
    pub mix_hash: String,

    /// Proof-of-work nonce
    pub nonce: String,

    /// Block number
    #[serde(deserialize_with = "quantity::deserialize")]
    pub number: u64,

    /// Parent block hash
    #[serde(alias = "parent_hash")]
    pub parent_hash: String,

    /// Root of the receipts trie
    #[serde(alias = "receipts_root")]
    pub receipts_root: String,

    /// Hash of the uncles list
    #[serde(alias = "sha3_uncles")]
    pub sha3_uncles: String,

    /// Block size in bytes (hex quantity)
    pub size: String,

    /// Root of the final state trie
    #[serde(alias = "state_root")]
    pub state_root: String,

    /// Block timestamp (Unix epoch seconds)
    #[serde(deserialize_with = "quantity::deserialize")]
    pub timestamp: u64,

    /// Total difficulty of the chain up to this block
    #[serde(alias = "total_difficulty")]
    pub total_difficulty: String,

    /// Transaction hashes, in block order
    pub transactions: Vec<String>,

    /// Root of the transactions trie
    #[serde(alias = "transactions_root")]
    pub transactions_root: String,

    /// Uncle block hashes, in block order
    pub uncles: Vec<String>,
}

impl Block {
    /// Block timestamp as a UTC date-time.
    ///
    /// Returns `None` if the timestamp is outside the range chrono can represent.
    #[must_use]
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// Parse a JSON-RPC quantity given as `0x` hex or plain decimal text.
///
/// An empty string reads as zero.
///
/// # Errors
///
/// Returns a decoding error if the text is not a valid number.
pub fn parse_quantity(text: &str) -> AgentResult<u128> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if hex.is_empty() {
            return Ok(0);
        }
        u128::from_str_radix(hex, 16)
    } else if text.is_empty() {
        return Ok(0);
    } else {
        text.parse::<u128>()
    };

    parsed.map_err(|e| AgentError::decoding(format!("invalid quantity: {text}"), Some(Box::new(e))))
}

/// Serde helpers for integer fields that nodes send as hex quantities.
pub(crate) mod quantity {
    use serde::{de, Deserialize, Deserializer};

    use super::parse_quantity;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u64),
        Text(String),
    }

    impl Quantity {
        fn into_u64<E: de::Error>(self) -> Result<u64, E> {
            match self {
                Self::Number(n) => Ok(n),
                Self::Text(text) => {
                    let value = parse_quantity(&text).map_err(E::custom)?;
                    u64::try_from(value)
                        .map_err(|_| E::custom(format!("quantity out of range: {text}")))
                }
            }
        }
    }

    /// Accept a JSON number or a `0x` hex / decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Quantity::deserialize(deserializer)?.into_u64()
    }

    /// Same as [`deserialize`] for optional fields; `null` reads as `None`.
    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Option::<Quantity>::deserialize(deserializer)?
            .map(Quantity::into_u64)
            .transpose()
    }
}

/// Build a block record from an Alloy RPC block.
///
/// Hashes are rendered as `0x` hex, quantities as `0x` hex numbers, and
/// transactions are reduced to their hashes whether or not the block was
/// fetched with full transaction objects.
impl From<&alloy::rpc::types::Block> for Block {
    fn from(block: &alloy::rpc::types::Block) -> Self {
        let header = &block.header;

        Self {
            difficulty: format!("{:#x}", header.difficulty),
            extra_data: header.extra_data.to_string(),
            gas_limit: format!("{:#x}", header.gas_limit),
            gas_used: format!("{:#x}", header.gas_used),
            hash: header.hash.to_string(),
            logs_bloom: header.logs_bloom.to_string(),
            miner: header.beneficiary.to_string(),
            mix_hash: header.mix_hash.to_string(),
            nonce: header.nonce.to_string(),
            number: header.number,
            parent_hash: header.parent_hash.to_string(),
            receipts_root: header.receipts_root.to_string(),
            sha3_uncles: header.ommers_hash.to_string(),
            size: header
                .size
                .map(|size| format!("{size:#x}"))
                .unwrap_or_default(),
            state_root: header.state_root.to_string(),
            timestamp: header.timestamp,
            total_difficulty: header
                .total_difficulty
                .map(|td| format!("{td:#x}"))
                .unwrap_or_default(),
            transactions: block
                .transactions
                .hashes()
                .map(|hash| hash.to_string())
                .collect(),
            transactions_root: header.transactions_root.to_string(),
            uncles: block.uncles.iter().map(ToString::to_string).collect(),
        }
    }
}
