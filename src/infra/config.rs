// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::TestgenError;

const CONFIG_FILE: &str = "testgen.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the evaluation endpoint lives. The endpoint is an external
/// collaborator: one request per comparison, no retries, no queueing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".into(),
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Config {
    /// Load `testgen.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self, TestgenError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, TestgenError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| TestgenError::Config(format!("{}: {e}", path.display())))
    }
}
