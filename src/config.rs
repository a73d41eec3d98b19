//! Configuration management for the application
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5001 }
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Admissions allowed per window.
    pub limit: u32,
    /// Trailing window length in seconds.
    pub window_seconds: u64,
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

fn default_max_clients() -> usize {
    10_000 // Upper bound on tracked client addresses
}

fn default_sweep_interval() -> u64 {
    300 // Sweep idle clients every 5 minutes by default
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 30,
            window_seconds: 60,
            max_clients: default_max_clients(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

/// Conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Timezone applied when a request does not name one.
    pub default_timezone: String,
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
    /// Format numeric-timestamp results in the caller's timezone instead of
    /// the server's local timezone.
    #[serde(default)]
    pub numeric_uses_caller_tz: bool,
}

fn default_max_input_length() -> usize {
    100
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_timezone: "America/Chicago".to_string(),
            max_input_length: default_max_input_length(),
            numeric_uses_caller_tz: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging format: "json" or "text"
    pub format: String,
    /// Default log level if no RUST_LOG is set
    pub default_level: String,
    /// Custom filter for dependency logs
    pub dependency_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            default_level: "info".to_string(),
            dependency_filter: Some("hyper=warn,h2=warn,tower=info,mio=warn".to_string()),
        }
    }
}

/// StatsD configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsdConfig {
    pub prefix: String,
    pub addr: String,
    pub enabled: bool,
}

impl Default for StatsdConfig {
    fn default() -> Self {
        Self { prefix: "timebridge".to_string(), addr: "127.0.0.1:8125".to_string(), enabled: false }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
    pub statsd: StatsdConfig,
}

impl Config {
    /// Load configuration from environment variables and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv().ok();

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("TIMEBRIDGE_").split("__"));

        // Optionally load from config file if TIMEBRIDGE_CONFIG is set
        if let Some(config_path) = std::env::var_os("TIMEBRIDGE_CONFIG") {
            if let Some(path_str) = config_path.to_str() {
                let path = Path::new(path_str);
                if path.exists() {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::MissingConfig("Server host is required".to_string()));
        }

        if self.rate_limit.limit == 0 {
            return Err(ConfigError::InvalidValue(
                "Rate limit must be greater than zero".to_string(),
            ));
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "Rate limit window must be greater than zero".to_string(),
            ));
        }
        if self.rate_limit.max_clients == 0 {
            return Err(ConfigError::InvalidValue(
                "Rate limiter client cap must be greater than zero".to_string(),
            ));
        }

        if self.convert.default_timezone.is_empty() {
            return Err(ConfigError::MissingConfig("Default timezone is required".to_string()));
        }
        if self.convert.max_input_length == 0 {
            return Err(ConfigError::InvalidValue(
                "Maximum input length must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_policy() {
        let config = Config::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.rate_limit.limit, 30);
        assert_eq!(config.rate_limit.window_seconds, 60);
        assert_eq!(config.convert.default_timezone, "America/Chicago");
        assert_eq!(config.convert.max_input_length, 100);
        assert!(!config.convert.numeric_uses_caller_tz);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limit_fails_validation() {
        let mut config = Config::default();
        config.rate_limit.limit = 0;
        assert!(config.validate().is_err());
    }
}
