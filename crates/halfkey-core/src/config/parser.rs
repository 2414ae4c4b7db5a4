// Halfkey Config Parser - TOML with Serde
// Parses the driver configuration from TOML files

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::key::key_from_name;
use crate::Key;

/// Default event poll timeout in milliseconds
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;

/// Niceness requested at startup unless configured otherwise
pub const DEFAULT_PRIORITY: i32 = -20;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    #[serde(default)]
    pub devices: Option<DevicesConfig>,

    #[serde(default, rename = "loop")]
    pub event_loop: Option<LoopConfig>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Mirror every key, for typing with the other hand
    #[serde(default)]
    pub mirror_mode: bool,
    /// Key name that stops the driver immediately
    pub emergency_eject_key: Option<String>,
}

/// Device filtering configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicesConfig {
    /// Explicit device names/paths to use
    #[serde(default)]
    pub only: Vec<String>,
}

/// Main loop behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoopConfig {
    /// Timeout passed to the evdev poll loop
    pub poll_timeout_ms: Option<u64>,
    /// Process niceness to request at startup (-20..=19)
    pub priority: Option<i32>,
}

/// Resolved driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mirror_mode: bool,
    pub emergency_eject_key: Option<Key>,
    /// Device name/path filter (empty = autodetect keyboards)
    pub device_filter: Vec<String>,
    pub poll_timeout_ms: u64,
    pub priority: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_mode: false,
            emergency_eject_key: None,
            device_filter: vec![],
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            priority: DEFAULT_PRIORITY,
        }
    }
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        toml_config.to_config()
    }

    /// Get the default config path (~/.config/halfkey/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("halfkey").join("config.toml"))
    }

    /// Load from the default location, or defaults when there is no file
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                log::info!("Loading config from {}", path.display());
                return Self::from_toml_path(path);
            }
        }
        Ok(Self::default())
    }
}

impl ConfigToml {
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(general) = &self.general {
            config.mirror_mode = general.mirror_mode;
            config.emergency_eject_key = general
                .emergency_eject_key
                .as_deref()
                .map(parse_key)
                .transpose()?;
        }

        if let Some(devices) = &self.devices {
            config.device_filter = devices.only.clone();
        }

        if let Some(event_loop) = &self.event_loop {
            if let Some(timeout) = event_loop.poll_timeout_ms {
                if timeout == 0 || timeout > i32::MAX as u64 {
                    return Err(ConfigError::OutOfRange(format!(
                        "poll_timeout_ms = {}",
                        timeout
                    )));
                }
                config.poll_timeout_ms = timeout;
            }
            if let Some(priority) = event_loop.priority {
                if !(-20..=19).contains(&priority) {
                    return Err(ConfigError::OutOfRange(format!(
                        "priority = {} (expected -20..=19)",
                        priority
                    )));
                }
                config.priority = priority;
            }
        }

        log::debug!("Resolved config: {:?}", config);
        Ok(config)
    }
}

fn parse_key(name: &str) -> Result<Key, ConfigError> {
    key_from_name(name).ok_or_else(|| ConfigError::InvalidKey(name.to_string()))
}
