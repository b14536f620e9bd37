//! Cache configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached responses
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
    /// TTL in seconds applied when a request does not set its own
    #[serde(default = "default_cache_ttl")]
    pub default_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            default_ttl: default_cache_ttl(),
        }
    }
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Merge cache configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_entries != default_cache_max_entries() {
            self.max_entries = other.max_entries;
        }
        if other.default_ttl != default_cache_ttl() {
            self.default_ttl = other.default_ttl;
        }
        self
    }
}
