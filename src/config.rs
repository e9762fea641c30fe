//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_profile_pics_path")]
    pub profile_pics_path: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_profile_pics_path() -> String {
    "/static/profile_pics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            profile_pics_path: default_profile_pics_path(),
        }
    }
}

/// Timings and limits of the interactive front-end
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_notification_ttl")]
    pub notification_ttl_ms: u64,

    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_progress_tick")]
    pub progress_tick_ms: u64,

    #[serde(default = "default_progress_step")]
    pub progress_max_step: f64,

    #[serde(default = "default_progress_cap")]
    pub progress_cap: f64,

    #[serde(default = "default_progress_settle")]
    pub progress_settle_ms: u64,
}

fn default_notification_ttl() -> u64 {
    4000
}

fn default_redirect_delay() -> u64 {
    1000
}

fn default_progress_tick() -> u64 {
    200
}

fn default_progress_step() -> f64 {
    15.0
}

fn default_progress_cap() -> f64 {
    90.0
}

fn default_progress_settle() -> u64 {
    1000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: default_notification_ttl(),
            redirect_delay_ms: default_redirect_delay(),
            progress_tick_ms: default_progress_tick(),
            progress_max_step: default_progress_step(),
            progress_cap: default_progress_cap(),
            progress_settle_ms: default_progress_settle(),
        }
    }
}

impl UiConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Tick period of the progress animation (never zero)
    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    pub fn progress_settle(&self) -> Duration {
        Duration::from_millis(self.progress_settle_ms)
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment, logging a broken file
    pub fn load_default() -> Self {
        Self::try_load_default().unwrap_or_else(|e| {
            tracing::warn!("{}; using defaults", e);
            Self::from_env()
        })
    }

    /// Load from default locations or environment.
    ///
    /// Fails only when a config file exists but none could be loaded, so
    /// callers can report it once logging is set up.
    pub fn try_load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("docchat").join("config.toml")),
            Some(PathBuf::from("./docchat.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// First existing path that loads; defaults when none exists
    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut first_error = None;

        for path in paths.iter().filter(|path| path.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {:?}", path);
                    return Ok(config);
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(url) = std::env::var("DOCCHAT_SERVER_URL") {
            self.server.base_url = url;
        }
        if let Ok(timeout) = std::env::var("DOCCHAT_REQUEST_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.server.request_timeout_secs = secs;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("DOCCHAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DOCCHAT_LOG_FORMAT") {
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
    r#"# Docchat Configuration
#
# Environment variables override these settings:
# - DOCCHAT_SERVER_URL
# - DOCCHAT_REQUEST_TIMEOUT
# - DOCCHAT_LOG_LEVEL
# - DOCCHAT_LOG_FORMAT

[server]
# Base URL of the document assistant service
base_url = "http://localhost:5000"

# Request timeout in seconds (question answering can be slow)
request_timeout_secs = 60

# Path profile pictures are served from
profile_pics_path = "/static/profile_pics"

[ui]
# How long notifications stay visible (ms)
notification_ttl_ms = 4000

# Delay before redirecting after login/signup (ms)
redirect_delay_ms = 1000

# Upload progress animation: tick period (ms), max step per tick (%),
# cap until the server answers (%), pause at 100% before reset (ms)
progress_tick_ms = 200
progress_max_step = 15.0
progress_cap = 90.0
progress_settle_ms = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
