//! Dashboard configuration
//!
//! Read from `config.toml` (or the user config dir), then patched from
//! `SOCIALPULSE_*` environment variables. Every field has a default, so an
//! absent file yields a usable config.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ClientConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sentiment API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every analysis
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_health_interval")]
    pub health_interval_secs: u64,

    /// Per-request timeout; unset waits indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    "bert".to_string()
}

fn default_health_interval() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            health_interval_secs: default_health_interval(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.map(|secs| secs * 1000),
        }
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }
}

/// Local history storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("socialpulse").to_string_lossy().to_string())
        .unwrap_or_else(|| "./socialpulse_data".to_string())
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl HistoryConfig {
    /// Data directory with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("socialpulse").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SOCIALPULSE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(model) = lookup("SOCIALPULSE_MODEL") {
            self.api.model = model;
        }
        if let Some(data_dir) = lookup("SOCIALPULSE_DATA_DIR") {
            self.history.data_dir = data_dir;
        }
        if let Some(level) = lookup("SOCIALPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SOCIALPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SocialPulse Dashboard Configuration
#
# Environment variables override these settings:
# - SOCIALPULSE_API_URL
# - SOCIALPULSE_MODEL
# - SOCIALPULSE_DATA_DIR
# - SOCIALPULSE_LOG_LEVEL
# - SOCIALPULSE_LOG_FORMAT

[api]
# Sentiment API base URL
base_url = "http://localhost:5000"

# Model sent with every analysis (bert, sklearn)
model = "bert"

# Seconds between health checks in watch mode
health_interval_secs = 30

# Per-request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[history]
# Directory holding the persisted history
data_dir = "~/.local/share/socialpulse"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
