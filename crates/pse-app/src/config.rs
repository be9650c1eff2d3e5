//! Front-end configuration.
//!
//! Resolution order: built-in defaults, then an optional YAML file, then the
//! `PSE_STORE` / `PSE_BIND` environment variables. Front ends apply their own
//! command-line flags last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const STORE_ENV: &str = "PSE_STORE";
pub const BIND_ENV: &str = "PSE_BIND";

pub const DEFAULT_STORE_PATH: &str = "saved_calculations.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding saved calculations
    pub store_path: PathBuf,
    /// Socket address for the web app
    pub bind: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, optionally overlaid by a YAML file, then by the environment.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var_os(STORE_ENV).map(PathBuf::from),
            std::env::var(BIND_ENV).ok(),
        );
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Load from a YAML file. Keys missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Replace fields for which an override is present. Empty values are ignored.
    pub fn apply_overrides(&mut self, store_path: Option<PathBuf>, bind: Option<String>) {
        if let Some(store_path) = store_path.filter(|p| !p.as_os_str().is_empty()) {
            self.store_path = store_path;
        }
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.bind = bind.trim().to_string();
        }
    }
}
