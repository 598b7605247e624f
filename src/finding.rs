//! Findings reported by agents.
//!
//! A [`Finding`] describes something an agent detected: what it is, how
//! severe it is, which detection rule raised it, and any addresses or
//! free-form metadata that help a responder act on it.
//!
//! ## Example
//!
//! ```
//! use forta_agent::finding::{Finding, FindingSeverity, FindingType};
//!
//! let finding = Finding::new(
//!     "High Tether Transfer",
//!     "High amount of USDT transferred: 20000",
//!     "FORTA-1",
//!     FindingSeverity::Low,
//!     FindingType::Info,
//! )
//! .with_metadata_entry("from", "0xabc")
//! .with_metadata_entry("to", "0xdef")
//! .with_address("0xdAC17F958D2ee523a2206206994597C13D831ec7");
//!
//! assert_eq!(finding.protocol, "ethereum");
//! assert_eq!(finding.metadata["to"], "0xdef");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AgentError, AgentResult};

/// Default protocol attached to findings.
pub const DEFAULT_PROTOCOL: &str = "ethereum";

/// How severe a finding is, from [`Unknown`](Self::Unknown) up to [`Critical`](Self::Critical).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum FindingSeverity {
    /// Severity not set
    #[default]
    Unknown = 0,
    /// Informational
    Info = 1,
    /// Low severity
    Low = 2,
    /// Medium severity
    Medium = 3,
    /// High severity
    High = 4,
    /// Critical severity
    Critical = 5,
}

impl FindingSeverity {
    /// Variant name as it appears in serialized findings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl TryFrom<u8> for FindingSeverity {
    type Error = AgentError;

    fn try_from(value: u8) -> AgentResult<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Info),
            2 => Ok(Self::Low),
            3 => Ok(Self::Medium),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            other => Err(AgentError::decoding(
                format!("invalid finding severity {other}"),
                None,
            )),
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a finding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum FindingType {
    /// Type not set
    #[default]
    Unknown = 0,
    /// An exploit in progress or completed
    Exploit = 1,
    /// Suspicious activity
    Suspicious = 2,
    /// Degraded protocol health
    Degraded = 3,
    /// Informational
    Info = 4,
}

impl FindingType {
    /// Variant name as it appears in serialized findings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Exploit => "Exploit",
            Self::Suspicious => "Suspicious",
            Self::Degraded => "Degraded",
            Self::Info => "Info",
        }
    }
}

impl TryFrom<u8> for FindingType {
    type Error = AgentError;

    fn try_from(value: u8) -> AgentResult<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Exploit),
            2 => Ok(Self::Suspicious),
            3 => Ok(Self::Degraded),
            4 => Ok(Self::Info),
            other => Err(AgentError::decoding(
                format!("invalid finding type {other}"),
                None,
            )),
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A condition detected by an agent.
///
/// Serialized with camelCase keys; severity and type are written by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Short human-readable title
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Identifier of the detection rule that produced the finding
    pub alert_id: String,

    /// Protocol the finding concerns
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Severity
    #[serde(default)]
    pub severity: FindingSeverity,

    /// Classification
    #[serde(rename = "type", default)]
    pub finding_type: FindingType,

    /// Free-form key/value metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Addresses involved in the finding
    #[serde(default)]
    pub addresses: Vec<String>,
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

impl Finding {
    /// Create a finding for the default protocol with no metadata or addresses.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        alert_id: impl Into<String>,
        severity: FindingSeverity,
        finding_type: FindingType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            alert_id: alert_id.into(),
            protocol: default_protocol(),
            severity,
            finding_type,
            metadata: BTreeMap::new(),
            addresses: Vec::new(),
        }
    }

    /// Set the protocol.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Replace the metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Insert one metadata entry, overwriting an existing value for the key.
    #[must_use]
    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the address list.
    #[must_use]
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Append one address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }
}

/// Pretty-printed JSON.
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
