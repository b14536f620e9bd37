//! HTTP transport configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL every relative endpoint is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum idle connections per host
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
    /// Headers sent with every request (caller headers override them)
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Merge HTTP configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        if other.connect_timeout != default_connect_timeout() {
            self.connect_timeout = other.connect_timeout;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        if other.pool_max_idle_per_host != default_pool_max_idle_per_host() {
            self.pool_max_idle_per_host = other.pool_max_idle_per_host;
        }
        self.default_headers.extend(other.default_headers);
        self
    }
}
