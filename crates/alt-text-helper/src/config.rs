//! Runtime configuration for the helper, loaded from JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Configuration for one course session.
#[derive(Debug, Clone, Deserialize)]
pub struct HelperConfig {
    /// Base URL of the alt-text API, e.g. `https://lms.example.edu/api/alt-text`.
    pub base_url: String,

    /// The course being reviewed.
    pub course_id: i64,

    /// Delay between scan status polls while a scan is active.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Images shown per review page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_page_size() -> usize {
    6
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl HelperConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HelperConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<HelperConfig, ConfigError> {
    let config: HelperConfig = serde_json::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &HelperConfig) -> Result<(), ConfigError> {
    if config.base_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "base_url must not be empty".to_string(),
        });
    }
    if config.page_size == 0 {
        return Err(ConfigError::Validation {
            message: "page_size must be greater than zero".to_string(),
        });
    }
    if config.poll_interval_ms == 0 {
        return Err(ConfigError::Validation {
            message: "poll_interval_ms must be greater than zero".to_string(),
        });
    }
    Ok(())
}
