//! Configuration Management
//!
//! Handles persistent configuration storage for ostc: the server address,
//! the default collection/cluster/record to act on, and request options.

use crate::resource::{AddressBuilder, Encoding, ParamMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8042";
pub const DEFAULT_RECORD_TYPE: &str = "STRING";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Server address, scheme + host + port
    #[serde(default)]
    pub base_url: Option<String>,
    /// Default collection
    #[serde(default)]
    pub collection: Option<String>,
    /// Default cluster
    #[serde(default)]
    pub cluster: Option<String>,
    /// Default record
    #[serde(default)]
    pub record: Option<String>,
    /// Default record type for CREATE/REPLACE
    #[serde(default)]
    pub record_type: Option<String>,
    /// Percent-encode names and values instead of sending them verbatim
    #[serde(default)]
    pub percent_encode: bool,
    /// Reject type/value on verbs that do not use them
    #[serde(default)]
    pub strict_params: bool,
    /// Whole-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ostrich-client").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective base URL (CLI > config > default), validated and
    /// without a trailing slash
    pub fn effective_base_url(&self, cli: Option<&str>) -> Result<String> {
        let raw = cli
            .map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let parsed =
            url::Url::parse(&raw).with_context(|| format!("Invalid base URL: {}", raw))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Base URL must use http or https: {}", raw);
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            anyhow::bail!("Base URL must not carry a query or fragment: {}", raw);
        }

        Ok(raw.strip_suffix('/').unwrap_or(&raw).to_string())
    }

    /// Get effective record type (CLI > config > STRING)
    pub fn effective_record_type(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.record_type.clone())
            .unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_string())
    }

    pub fn encoding(&self) -> Encoding {
        if self.percent_encode {
            Encoding::Percent
        } else {
            Encoding::Verbatim
        }
    }

    pub fn param_mode(&self) -> ParamMode {
        if self.strict_params {
            ParamMode::Strict
        } else {
            ParamMode::Lenient
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Address builder configured from these settings
    pub fn address_builder(&self, cli_base: Option<&str>) -> Result<AddressBuilder> {
        Ok(AddressBuilder::new(self.effective_base_url(cli_base)?)
            .with_encoding(self.encoding())
            .with_param_mode(self.param_mode()))
    }
}
