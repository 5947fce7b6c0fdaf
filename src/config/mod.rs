//! Service configuration loaded from TOML.
//!
//! ```toml
//! collection_path = "api/heroes"
//! base_url = "http://localhost:3000"   # omit to use the in-memory backend
//! seed_heroes = true
//! channel_buffer = 32
//! ```

use crate::clients::HEROES_URL;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Where the service sends its requests and how the in-memory backend is set up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Collection path relative to the base, without leading or trailing `/`.
    pub collection_path: String,
    /// Absolute `http`/`https` URL of a real server. `None` selects the in-memory backend.
    pub base_url: Option<String>,
    /// Load the classic roster into the in-memory backend.
    pub seed_heroes: bool,
    /// Mailbox size of the in-memory backend task.
    pub channel_buffer: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            collection_path: HEROES_URL.to_string(),
            base_url: None,
            seed_heroes: true,
            channel_buffer: 32,
        }
    }
}

impl ServiceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let path = &self.collection_path;
        if path.trim().is_empty() {
            return Err(ConfigError::Validation("collection_path must not be empty".into()));
        }
        if path.starts_with('/') || path.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "collection_path '{}' must not start or end with '/'",
                path
            )));
        }
        if let Some(base_url) = &self.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| {
                ConfigError::Validation(format!("base_url '{}' is invalid: {}", base_url, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "base_url '{}' must use http or https",
                    base_url
                )));
            }
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Validation("channel_buffer must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    ServiceConfig::from_toml_str(&content)
}
