//! Configuration management for the API client
//!
//! This module handles loading, validation, and merging of client configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Transport configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Auth header configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// GET coalescing configuration
    #[serde(default)]
    pub batch: BatchConfig,
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.http.base_url = base_url.into();
        config
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ClientError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("CMS_API_BASE_URL") {
            config.http.base_url = base_url;
        }
        if let Some(timeout) = parse_env("CMS_API_TIMEOUT")? {
            config.http.timeout = timeout;
        }
        if let Ok(secret) = env::var("CMS_API_TOKEN_SECRET") {
            config.auth.token_secret = Some(secret);
        }
        if let Some(ttl) = parse_env("CMS_API_TOKEN_TTL")? {
            config.auth.token_ttl = ttl;
        }
        if let Some(ttl) = parse_env("CMS_API_CACHE_TTL")? {
            config.cache.default_ttl = ttl;
        }
        if let Some(max_entries) = parse_env("CMS_API_CACHE_MAX_ENTRIES")? {
            config.cache.max_entries = max_entries;
        }
        if let Some(delay) = parse_env("CMS_API_BATCH_DELAY_MS")? {
            config.batch.delay_ms = delay;
        }
        if let Some(max_size) = parse_env("CMS_API_MAX_BATCH_SIZE")? {
            config.batch.max_size = max_size;
        }
        if let Some(coalesce) = parse_env("CMS_API_COALESCE_READS")? {
            config.batch.coalesce_single_reads = coalesce;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.http.validate_section("HTTP")?;
        self.auth.validate_section("Auth")?;
        self.cache.validate_section("Cache")?;
        self.batch.validate_section("Batch")?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.http = self.http.merge(other.http);
        self.auth = self.auth.merge(other.auth);
        self.cache = self.cache.merge(other.cache);
        self.batch = self.batch.merge(other.batch);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ClientError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ClientError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}
