//! API server configuration loaded from environment variables.

use std::env;

use thiserror::Error;

/// Errors during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(String),
}

/// API server runtime configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the document index (e.g. `http://localhost:9200`).
    pub index_url: String,
    /// TCP address to bind (e.g. `0.0.0.0:8080`).
    pub bind_addr: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `INDEX_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            index_url: env::var("INDEX_URL")
                .map_err(|_| ConfigError::Missing("INDEX_URL".to_owned()))?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
        })
    }
}
