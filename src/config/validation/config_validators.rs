//! Configuration validators
//!
//! Validation implementations for HttpConfig, AuthConfig, CacheConfig and
//! BatchConfig.

use super::trait_def::Validate;
use crate::config::models::*;

/// Longest debounce window accepted, in milliseconds
const MAX_BATCH_DELAY_MS: u64 = 10_000;

impl Validate for HttpConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.connect_timeout == 0 {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("User agent cannot be empty".to_string());
        }

        if self.default_headers.keys().any(|name| name.trim().is_empty()) {
            return Err("Default header names cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.header_name.trim().is_empty() {
            return Err("Auth header name cannot be empty".to_string());
        }

        if self.token_ttl == 0 {
            return Err("Token TTL must be greater than 0".to_string());
        }

        if self.token_ttl > MAX_TOKEN_TTL_SECS {
            return Err(format!(
                "Token TTL cannot exceed {} seconds",
                MAX_TOKEN_TTL_SECS
            ));
        }

        if let Some(secret) = &self.token_secret {
            if secret.is_empty() {
                return Err("Token secret cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_ttl == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }

        if self.max_entries == 0 {
            return Err("Cache max entries must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_size == 0 {
            return Err("Max batch size must be at least 1".to_string());
        }

        if self.delay_ms > MAX_BATCH_DELAY_MS {
            return Err(format!(
                "Batch delay must not exceed {}ms, got {}ms",
                MAX_BATCH_DELAY_MS, self.delay_ms
            ));
        }

        Ok(())
    }
}
