//! Error types for the agent SDK.
//!
//! This module provides a unified error type [`AgentError`] shared by the
//! configuration loader, the JSON decoders and every [`HandleBlock`]
//! implementation.
//!
//! # Design
//!
//! The error hierarchy is organized by concern:
//! - [`AgentError::ConfigError`]: Configuration file and environment issues
//! - [`AgentError::DecodingError`]: Malformed JSON, unknown chain IDs or enum values
//! - [`AgentError::HandlerError`]: Failures raised by detection handlers
//!
//! All errors implement [`std::error::Error`] and include rich context via
//! the source error chain.
//!
//! # Example
//!
//! ```
//! use forta_agent::error::{AgentError, AgentResult};
//!
//! fn parse_gas(gas: &str) -> AgentResult<u64> {
//!     gas.parse::<u64>()
//!         .map_err(|e| AgentError::decoding(format!("invalid gas value: {gas}"), Some(Box::new(e))))
//! }
//!
//! assert!(parse_gas("21000").is_ok());
//! assert!(parse_gas("lots").is_err());
//! ```
//!
//! [`HandleBlock`]: crate::handler::HandleBlock

use std::fmt;

/// Result type alias using [`AgentError`].
pub type AgentResult<T> = Result<T, AgentError>;

/// Unified error type for the agent SDK.
#[derive(Debug)]
pub enum AgentError {
    /// Configuration or environment variable errors.
    ///
    /// Variants include:
    /// - Unreadable or malformed `forta.config.json`
    /// - Invalid environment variable values
    /// - Missing JSON-RPC URL
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Decoding errors.
    ///
    /// Variants include:
    /// - Malformed block or block event JSON
    /// - Unknown chain ID
    /// - Out-of-range enum discriminant
    /// - Non-numeric quantity text
    DecodingError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Errors raised while a handler processes a block event.
    HandlerError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AgentError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use forta_agent::error::AgentError;
    ///
    /// let err = AgentError::config("no jsonRpcUrl found", None);
    /// assert!(matches!(err, AgentError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new decoding error.
    ///
    /// # Example
    ///
    /// ```
    /// use forta_agent::error::AgentError;
    ///
    /// let err = AgentError::decoding("unknown chain id 2", None);
    /// assert!(matches!(err, AgentError::DecodingError { .. }));
    /// ```
    #[must_use]
    pub fn decoding(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DecodingError {
            message: message.into(),
            source,
        }
    }

    /// Create a new handler error.
    ///
    /// # Example
    ///
    /// ```
    /// use forta_agent::error::AgentError;
    ///
    /// let err = AgentError::handler("no block handlers found", None);
    /// assert!(matches!(err, AgentError::HandlerError { .. }));
    /// ```
    #[must_use]
    pub fn handler(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::HandlerError {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::DecodingError { message, .. } => write!(f, "Decoding error: {message}"),
            Self::HandlerError { message, .. } => write!(f, "Handler error: {message}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. }
            | Self::DecodingError { source, .. }
            | Self::HandlerError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
        }
    }
}

/// Convert from `eyre::Report` to `AgentError`.
///
/// Handlers written against `eyre` can use `?` directly; the report is
/// categorized as a handler error.
impl From<eyre::Report> for AgentError {
    fn from(err: eyre::Report) -> Self {
        Self::HandlerError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodingError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
