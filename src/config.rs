//! Agent configuration.
//!
//! Configuration comes from a `forta.config.json` file in the working
//! directory, with environment variables (optionally loaded from `.env` via
//! `dotenvy`) taking precedence.
//!
//! ## Environment Variables
//!
//! All optional:
//! - `FORTA_CONFIG`: Path to the JSON config file (default: "forta.config.json")
//! - `JSON_RPC_HOST`: JSON-RPC host supplied by the scanner; overrides `jsonRpcUrl`
//! - `JSON_RPC_PORT`: Port appended to `JSON_RPC_HOST`
//! - `RUST_LOG`: Logging level (default: "info")
//!
//! ## Config File Keys
//!
//! ```json
//! {
//!   "agentId": "0x...",
//!   "version": "0.0.1",
//!   "jsonRpcUrl": "https://cloudflare-eth.com/",
//!   "debug": false
//! }
//! ```
//!
//! A missing config file is not an error: every key is optional.
//!
//! ## Example
//!
//! ```no_run
//! use forta_agent::config::Config;
//! use forta_agent::error::AgentResult;
//!
//! # fn main() -> AgentResult<()> {
//! let config = Config::from_env()?;
//! println!("JSON-RPC URL: {}", config.json_rpc_url()?);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AgentError, AgentResult};

/// Config file name looked up when `FORTA_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "forta.config.json";

/// On-disk shape of `forta.config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    agent_id: Option<String>,
    version: Option<String>,
    json_rpc_url: Option<String>,
    debug: bool,
}

/// Resolved agent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path the config file was looked up at
    config_path: PathBuf,

    /// Agent identifier
    agent_id: Option<String>,

    /// Agent version
    version: Option<String>,

    /// JSON-RPC endpoint, after environment overrides
    json_rpc_url: Option<String>,

    /// Enable debug logging
    debug: bool,

    /// Whether a config file was found and read
    from_file: bool,
}

impl Config {
    /// Load configuration from the environment and the config file.
    ///
    /// This function:
    /// 1. Loads `.env` file using `dotenvy` (if present)
    /// 2. Resolves the config file path from `FORTA_CONFIG`
    /// 3. Reads the config file if it exists
    /// 4. Applies the `JSON_RPC_HOST`/`JSON_RPC_PORT` override
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn from_env() -> AgentResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        let config_path =
            env::var("FORTA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let rpc_host = env::var("JSON_RPC_HOST").ok();
        let rpc_port = env::var("JSON_RPC_PORT").ok();

        Self::load(config_path, rpc_host.as_deref(), rpc_port.as_deref())
    }

    /// Load configuration from an explicit file path and JSON-RPC override.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid JSON.
    pub fn load(
        config_path: impl AsRef<Path>,
        rpc_host: Option<&str>,
        rpc_port: Option<&str>,
    ) -> AgentResult<Self> {
        let config_path = config_path.as_ref().to_path_buf();

        let from_file = config_path.exists();
        let file = if from_file {
            let data = fs::read_to_string(&config_path)
                .map_err(|e| file_error(&config_path, "unable to read config file", e))?;
            serde_json::from_str::<ConfigFile>(&data)
                .map_err(|e| file_error(&config_path, "unable to parse config file", e))?
        } else {
            ConfigFile::default()
        };

        let json_rpc_url = scanner_rpc_url(rpc_host, rpc_port).or(file.json_rpc_url);

        Ok(Self {
            config_path,
            agent_id: file.agent_id,
            version: file.version,
            json_rpc_url,
            debug: file.debug,
            from_file,
        })
    }

    /// Get the path the config file was looked up at.
    #[must_use]
    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Get the agent identifier.
    #[must_use]
    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    /// Get the agent version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Get the JSON-RPC URL.
    ///
    /// # Errors
    ///
    /// Returns a config error if neither the environment nor the config file provides one.
    pub fn json_rpc_url(&self) -> AgentResult<&str> {
        self.json_rpc_url
            .as_deref()
            .ok_or_else(|| AgentError::config("no jsonRpcUrl found", None))
    }

    /// Check if debug logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Check whether the values came from a config file rather than defaults.
    #[must_use]
    pub const fn from_file(&self) -> bool {
        self.from_file
    }
}

fn file_error(
    path: &Path,
    message: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> AgentError {
    AgentError::config(
        format!("{message} {}: {source}", path.display()),
        Some(Box::new(source)),
    )
}

/// URL of the JSON-RPC endpoint provided by the scanner, if any.
///
/// Empty values count as unset.
fn scanner_rpc_url(host: Option<&str>, port: Option<&str>) -> Option<String> {
    let host = host.filter(|h| !h.is_empty())?;
    match port.filter(|p| !p.is_empty()) {
        Some(port) => Some(format!("http://{host}:{port}")),
        None => Some(format!("http://{host}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("forta.config.json"), None, None).unwrap();

        assert!(config.agent_id().is_none());
        assert!(config.version().is_none());
        assert!(!config.debug());
        assert!(!config.from_file());
        assert!(config.json_rpc_url().is_err());
    }

    #[test]
    fn test_reads_file_keys() {
        let file = write_config(
            r#"{"agentId": "0xagent", "version": "0.0.1", "jsonRpcUrl": "https://rpc.example", "debug": true}"#,
        );
        let config = Config::load(file.path(), None, None).unwrap();

        assert_eq!(config.agent_id(), Some("0xagent"));
        assert_eq!(config.version(), Some("0.0.1"));
        assert_eq!(config.json_rpc_url().unwrap(), "https://rpc.example");
        assert!(config.debug());
        assert!(config.from_file());
        assert_eq!(config.config_path(), &file.path().to_path_buf());
    }

    #[test]
    fn test_scanner_host_overrides_file() {
        let file = write_config(r#"{"jsonRpcUrl": "https://rpc.example"}"#);

        let config = Config::load(file.path(), Some("json-rpc"), Some("8545")).unwrap();
        assert_eq!(config.json_rpc_url().unwrap(), "http://json-rpc:8545");

        let config = Config::load(file.path(), Some("json-rpc"), None).unwrap();
        assert_eq!(config.json_rpc_url().unwrap(), "http://json-rpc");

        let config = Config::load(file.path(), Some(""), Some("8545")).unwrap();
        assert_eq!(config.json_rpc_url().unwrap(), "https://rpc.example");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let file = write_config("{ not json");
        let err = Config::load(file.path(), None, None).unwrap_err();

        assert!(matches!(err, AgentError::ConfigError { .. }));
        assert!(err.to_string().contains("unable to parse config file"));
    }
}
