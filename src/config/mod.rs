//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::{AwardSettings, SortDirection, SortField};
use crate::source::SourceConfig;
use crate::storage::StorageConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Player leaderboard defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Sort applied when a request names none
    #[serde(default)]
    pub default_sort: SortField,

    #[serde(default)]
    pub default_direction: SortDirection,

    /// Rows per page when a request names none
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    50
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            default_sort: SortField::default(),
            default_direction: SortDirection::default(),
            page_size: default_page_size(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub awards: AwardSettings,

    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            awards: AwardSettings::default(),
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if let SourceConfig::Rest {
            base_url,
            timeout_seconds,
            ..
        } = &self.source
        {
            if base_url.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "REST source requires a base_url".to_string(),
                ));
            }
            if *timeout_seconds == 0 {
                return Err(ConfigError::ValidationError(
                    "Source timeout must be greater than 0".to_string(),
                ));
            }
        }

        if self.awards.list_size == 0 {
            return Err(ConfigError::ValidationError(
                "Award list size must be greater than 0".to_string(),
            ));
        }

        if !(1..=100).contains(&self.leaderboard.page_size) {
            return Err(ConfigError::ValidationError(
                "Leaderboard page size must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}
