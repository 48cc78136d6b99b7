//! TOML configuration for a relay run

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CORRELATION_ID: &str = "001";
pub const DEFAULT_FIRST_CHANNEL: &str = "001";
pub const DEFAULT_SECOND_CHANNEL: &str = "002";

const DEFAULT_STAGE_COMMAND: &str = "true";
const DEFAULT_SIGNAL_COMMAND: &str = "sleep 1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-stage overrides, keyed by stage name ("first", "second", "third")
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    /// Shell command the stage runs
    pub run: Option<String>,
}

/// Per-signal overrides, keyed by "notification" or "second_notification"
#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    /// Shell command the signal source runs before completing
    pub run: Option<String>,
    /// Channel id the source presents while running
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_correlation_id")]
    pub correlation_id: String,

    #[serde(default)]
    pub stage: HashMap<String, StageConfig>,

    #[serde(default)]
    pub signal: HashMap<String, SignalConfig>,
}

fn default_correlation_id() -> String {
    DEFAULT_CORRELATION_ID.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            correlation_id: default_correlation_id(),
            stage: HashMap::new(),
            signal: HashMap::new(),
        }
    }
}

impl RelayConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Command for a stage, falling back to a no-op
    pub fn stage_command(&self, stage: &str) -> String {
        self.stage
            .get(stage)
            .and_then(|s| s.run.clone())
            .unwrap_or_else(|| DEFAULT_STAGE_COMMAND.to_string())
    }

    /// Command a signal source runs before publishing completion
    pub fn signal_command(&self, signal: &str) -> String {
        self.signal
            .get(signal)
            .and_then(|s| s.run.clone())
            .unwrap_or_else(|| DEFAULT_SIGNAL_COMMAND.to_string())
    }

    /// Channel id for a signal source
    pub fn signal_channel(&self, signal: &str) -> String {
        if let Some(channel) = self.signal.get(signal).and_then(|s| s.channel.clone()) {
            return channel;
        }
        match signal {
            "second_notification" => DEFAULT_SECOND_CHANNEL.to_string(),
            _ => DEFAULT_FIRST_CHANNEL.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
