//! Configuration management
//!
//! Config is stored at `~/.rxverify/config.toml` unless a path is given
//! explicitly. A missing file means defaults; an unreadable one is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiSettings};
use crate::core::services::DEFAULT_REGULATOR;
use crate::paths;

/// Environment variable consulted when the configured one is unset
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Errors loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or written
    #[error("failed to access config at {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config at {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// rxverify configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge service settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    /// Scan history settings
    #[serde(default)]
    pub history: HistoryConfig,
    /// Acting user defaults
    #[serde(default)]
    pub user: UserConfig,
}

/// Knowledge service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Gemini model id
    #[serde(default = "default_model")]
    pub model: String,
    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Ground answers with Google Search
    #[serde(default = "default_true")]
    pub search_grounding: bool,
    /// Deadline for one verification, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// National regulator consulted first
    #[serde(default = "default_regulator")]
    pub regulator: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_regulator() -> String {
    DEFAULT_REGULATOR.to_string()
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            search_grounding: default_true(),
            timeout_secs: default_timeout_secs(),
            regulator: default_regulator(),
        }
    }
}

impl KnowledgeConfig {
    /// Deadline for one verification
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from the environment
    ///
    /// Reads `api_key_env`, then [`FALLBACK_API_KEY_ENV`]. Empty values count
    /// as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }

    /// Settings for the Gemini adapter
    #[must_use]
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            search_grounding: self.search_grounding,
            timeout: self.timeout(),
        }
    }
}

/// Scan history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record scans after verification
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log file; defaults to `~/.rxverify/scans.jsonl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// Effective history file path
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(paths::scan_history)
    }
}

/// Acting user defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// User id attached to scan records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Config {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_error)
    }
}
