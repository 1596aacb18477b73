//! Host configuration, as passed to `initialize`.

use navi_retrieval::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HostError, HostResult};

/// Configuration for opening the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Path to the chunk snapshot file
    #[serde(alias = "snapshot_path")]
    pub db_path: PathBuf,
    /// Ranking parameters
    #[serde(default)]
    pub search: SearchConfig,
}

impl HostConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            search: SearchConfig::default(),
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> HostResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| HostError::config(format!("cannot parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate `initialize` params
    pub fn from_value(value: serde_json::Value) -> HostResult<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| HostError::config(format!("cannot parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the core cannot serve
    pub fn validate(&self) -> HostResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(HostError::config("db_path is empty"));
        }
        if self.search.dimension == 0 {
            return Err(HostError::config("search.dimension must be > 0"));
        }
        Ok(())
    }
}
