use crate::extractor::rules::SiteRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Configuration for the clipper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipperConfig {
    /// Base URL of the dashboard API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// URL of the WebDriver instance driving the browser
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// File backing the credential store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Poll attempts before the token relay gives up
    #[serde(default = "default_relay_max_attempts")]
    pub relay_max_attempts: u32,

    /// Seconds between relay poll attempts
    #[serde(default = "default_relay_interval_secs")]
    pub relay_interval_secs: u64,

    /// Site extraction rules; `None` means the built-in rule set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<SiteRule>>,
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            webdriver_url: default_webdriver_url(),
            store_path: default_store_path(),
            relay_max_attempts: default_relay_max_attempts(),
            relay_interval_secs: default_relay_interval_secs(),
            rules: None,
        }
    }
}

impl ClipperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default dashboard URL
fn default_api_base_url() -> String {
    "https://job-flow-psi.vercel.app".to_string()
}

/// Default WebDriver URL
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default credential store location, in the per-user data directory when
/// one can be resolved
fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "jobclip")
        .map(|dirs| dirs.data_dir().join("store.json"))
        .unwrap_or_else(|| PathBuf::from("jobclip-store.json"))
}

/// Default relay retry budget
fn default_relay_max_attempts() -> u32 {
    20
}

/// Default relay poll spacing
fn default_relay_interval_secs() -> u64 {
    1
}
