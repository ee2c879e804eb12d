//! Dashboard configuration (`config.toml`).
//!
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! [analysis]
//! model = "gemini-2.5-flash"
//! api_key_env = "API_KEY"
//! timeout_secs = 30
//!
//! [history]
//! length = 31
//!
//! [rng]
//! master_seed = 42
//!
//! [catalog]
//! path = "funds.toml"
//! history_dir = "closes/"
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{CatalogError, InMemoryCatalog};
use crate::rng::RngHierarchy;
use crate::series::DEFAULT_HISTORY_LENGTH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub model: String,
    /// Base URL of the generative language API.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Keep every n-th history point in the prompt.
    pub sample_every: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: "API_KEY".into(),
            timeout_secs: 30,
            sample_every: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub length: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntradayConfig {
    /// `HH:MM` tick flagged as the alert trigger; empty disables it.
    pub trigger_time: String,
}

impl Default for IntradayConfig {
    fn default() -> Self {
        Self {
            trigger_time: "10:42".into(),
        }
    }
}

impl IntradayConfig {
    pub fn trigger(&self) -> Result<Option<NaiveTime>, ConfigError> {
        let raw = self.trigger_time.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map(Some)
            .map_err(|e| ConfigError::Invalid(format!("intraday.trigger_time '{raw}': {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for reproducible charts; random per process when unset.
    pub master_seed: Option<u64>,
}

impl RngConfig {
    pub fn hierarchy(&self) -> RngHierarchy {
        match self.master_seed {
            Some(seed) => RngHierarchy::new(seed),
            None => RngHierarchy::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in demo funds when unset.
    pub path: Option<PathBuf>,
    /// Directory of `<CODE>.csv` recorded closes.
    pub history_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub analysis: AnalysisConfig,
    pub history: HistoryConfig,
    pub intraday: IntradayConfig,
    pub rng: RngConfig,
    pub catalog: CatalogConfig,
}

impl DashboardConfig {
    /// `<config_dir>/fundflow/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fundflow").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit file, else the default location if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.model.trim().is_empty() {
            return Err(ConfigError::Invalid("analysis.model is empty".into()));
        }
        if self.analysis.timeout_secs == 0 {
            return Err(ConfigError::Invalid("analysis.timeout_secs must be positive".into()));
        }
        if self.analysis.sample_every == 0 {
            return Err(ConfigError::Invalid("analysis.sample_every must be positive".into()));
        }
        if self.history.length == 0 {
            return Err(ConfigError::Invalid("history.length must be positive".into()));
        }
        self.intraday.trigger()?;
        Ok(())
    }

    /// Build the catalog this config describes.
    pub fn open_catalog(&self) -> Result<InMemoryCatalog, CatalogError> {
        let mut catalog = match &self.catalog.path {
            Some(path) => InMemoryCatalog::from_file(path)?,
            None => InMemoryCatalog::builtin(),
        };
        if let Some(dir) = &self.catalog.history_dir {
            catalog = catalog.load_history_dir(dir)?;
        }
        Ok(catalog)
    }
}
