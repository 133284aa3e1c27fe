// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything has a default, so the tool works with no config file at all.
// A TOML file can override any field, and the command line overrides the
// file (see main.rs).
//
// Example config.toml:
//
//   [parser]
//   heading-marker = "###"
//   rows-to-skip = 2
//   sentinel = "Back to Index"
//
//   [probe]
//   timeout-secs = 10
//   concurrency = 16
//   user-agent = "Mozilla/5.0"
//   max-redirects = 10
// =============================================================================

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub probe: ProbeConfig,
}

/// How the catalog layout is recognized
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Prefix that starts a section heading
    pub heading_marker: String,

    /// Lines skipped after each heading (table header + separator)
    pub rows_to_skip: usize,

    /// Substring of the line that closes a section
    pub sentinel: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            heading_marker: "###".to_string(),
            rows_to_skip: 2,
            sentinel: "Back to Index".to_string(),
        }
    }
}

/// How each link is probed
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProbeConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum number of probes in flight at once
    pub concurrency: usize,

    /// User-Agent header sent with every probe
    pub user_agent: String,

    /// Redirect hops followed before giving up
    pub max_redirects: usize,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            concurrency: 16,
            user_agent: "Mozilla/5.0".to_string(),
            max_redirects: 10,
        }
    }
}

/// Loads, parses and validates a TOML config file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Checks that every field is usable
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let parser = &config.parser;
    if parser.heading_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "heading-marker cannot be empty".to_string(),
        ));
    }
    if parser.sentinel.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sentinel cannot be empty".to_string(),
        ));
    }

    let probe = &config.probe;
    if probe.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            probe.timeout_secs
        )));
    }
    if probe.concurrency < 1 || probe.concurrency > 256 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 256, got {}",
            probe.concurrency
        )));
    }
    if probe.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
