//! Supported networks and their canonical chain IDs.
//!
//! Each [`Network`] variant is backed by the chain ID the network reports
//! through `eth_chainId`, so the enum can be cast straight to the integer
//! and parsed back from it.
//!
//! ## Example
//!
//! ```
//! use forta_agent::network::Network;
//!
//! let network = Network::from_chain_id(137)?;
//! assert_eq!(network, Network::Polygon);
//! assert_eq!(network.chain_id(), 137);
//! assert_eq!("arbitrum".parse::<Network>()?, Network::Arbitrum);
//! # Ok::<(), forta_agent::error::AgentError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AgentError, AgentResult};

/// A chain an agent can be deployed against.
///
/// Serialized as the bare chain ID integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u64)]
pub enum Network {
    /// Ethereum mainnet
    #[default]
    Mainnet = 1,
    /// Ropsten testnet
    Ropsten = 3,
    /// Rinkeby testnet
    Rinkeby = 4,
    /// Goerli testnet
    Goerli = 5,
    /// Optimism
    Optimism = 10,
    /// BNB Smart Chain
    Bsc = 56,
    /// Polygon PoS
    Polygon = 137,
    /// Fantom Opera
    Fantom = 250,
    /// Arbitrum One
    Arbitrum = 42161,
    /// Avalanche C-Chain
    Avalanche = 43114,
}

impl Network {
    /// Every supported network, in ascending chain ID order.
    pub const ALL: [Self; 10] = [
        Self::Mainnet,
        Self::Ropsten,
        Self::Rinkeby,
        Self::Goerli,
        Self::Optimism,
        Self::Bsc,
        Self::Polygon,
        Self::Fantom,
        Self::Arbitrum,
        Self::Avalanche,
    ];

    /// Canonical chain ID of the network.
    #[must_use]
    pub const fn chain_id(self) -> u64 {
        self as u64
    }

    /// Lowercase slug used on the command line and in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Ropsten => "ropsten",
            Self::Rinkeby => "rinkeby",
            Self::Goerli => "goerli",
            Self::Optimism => "optimism",
            Self::Bsc => "bsc",
            Self::Polygon => "polygon",
            Self::Fantom => "fantom",
            Self::Arbitrum => "arbitrum",
            Self::Avalanche => "avalanche",
        }
    }

    /// Look up a network by chain ID.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the chain ID is not one of the supported networks.
    pub fn from_chain_id(chain_id: u64) -> AgentResult<Self> {
        Self::ALL
            .into_iter()
            .find(|network| network.chain_id() == chain_id)
            .ok_or_else(|| AgentError::decoding(format!("unsupported chain id {chain_id}"), None))
    }
}

impl TryFrom<u64> for Network {
    type Error = AgentError;

    fn try_from(chain_id: u64) -> AgentResult<Self> {
        Self::from_chain_id(chain_id)
    }
}

impl From<Network> for u64 {
    fn from(network: Network) -> Self {
        network.chain_id()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses either a slug (`"polygon"`, case-insensitive) or a decimal chain ID (`"137"`).
impl FromStr for Network {
    type Err = AgentError;

    fn from_str(s: &str) -> AgentResult<Self> {
        let s = s.trim();
        if let Ok(chain_id) = s.parse::<u64>() {
            return Self::from_chain_id(chain_id);
        }

        Self::ALL
            .into_iter()
            .find(|network| network.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AgentError::decoding(format!("unknown network: {s}"), None))
    }
}
