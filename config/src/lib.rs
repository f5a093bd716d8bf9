#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Client Configuration
//!
//! This crate provides configuration management for the Zcash RPC client.
//! It handles loading and saving configuration files that specify:
//! - How to reach the daemon's RPC endpoint, and which credentials to use
//! - Logging configuration
//!
//! Configuration is stored in TOML format. Every section and field has a
//! default, so a file only needs to mention what it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Daemon connection settings
    pub rpc: RpcConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Daemon connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// RPC endpoint URL
    pub url: String,
    /// RPC username
    pub user: Option<String>,
    /// RPC password
    pub password: Option<String>,
    /// Path to the daemon's `.cookie` file, used when no user is set
    pub cookie_file: Option<PathBuf>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8232".to_string(),
            user: None,
            password: None,
            cookie_file: None,
        }
    }
}

/// How to authenticate against the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcAuth {
    /// No credentials
    None,
    /// Explicit basic-auth credentials
    Basic {
        /// RPC username
        user: String,
        /// RPC password
        password: String,
    },
    /// Credentials read from a cookie file
    Cookie(PathBuf),
}

impl RpcConfig {
    /// Resolve the credentials to use; an explicit user wins over a cookie
    /// file.
    pub fn auth(&self) -> RpcAuth {
        match (&self.user, &self.cookie_file) {
            (Some(user), _) => RpcAuth::Basic {
                user: user.clone(),
                password: self.password.clone().unwrap_or_default(),
            },
            (None, Some(cookie)) => RpcAuth::Cookie(cookie.clone()),
            (None, None) => RpcAuth::None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (e.g. `info`, `client=debug`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/zcashrpc/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("zcashrpc");
        Ok(config_dir.join("config.toml"))
    }

    /// Load from an explicit `path`, which must exist, or else from the
    /// default path, falling back to defaults when that file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::from_file(path),
                Ok(_) | Err(ConfigError::ConfigDirUnavailable) => Ok(Self::default()),
                Err(other) => Err(other),
            },
        }
    }
}
