//! # Settings
//!
//! Runtime configuration, resolved in three layers, each overriding the last:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. the `STOCKROOM_DATA_DIR` environment variable
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! data_dir = "/var/lib/stockroom"
//! channel_capacity = 32
//! notification_display_ms = 3000
//! record_product_additions = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides [`Settings::data_dir`].
pub const DATA_DIR_ENV: &str = "STOCKROOM_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding one `<key>.json` file per collection.
    pub data_dir: PathBuf,
    /// Mailbox size of each collection actor.
    pub channel_capacity: usize,
    /// How long each notification stays on screen.
    pub notification_display_ms: u64,
    /// Also write a `product_added` ledger record when a product is created.
    pub record_product_additions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("stockroom-data"),
            channel_capacity: 32,
            notification_display_ms: 3000,
            record_product_additions: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies environment overrides read through `lookup`. Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid("channel_capacity must be at least 1"));
        }
        if self.notification_display_ms == 0 {
            return Err(ConfigError::Invalid("notification_display_ms must be at least 1"));
        }
        Ok(())
    }
}
