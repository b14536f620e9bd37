//! HTTP client construction
//!
//! One pooled `reqwest::Client` per `ApiClient` keeps TCP connections and
//! DNS lookups shared across every request the client issues.

use crate::config::HttpConfig;
use crate::utils::error::{ClientError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct HttpClientPoolConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl From<&HttpConfig> for HttpClientPoolConfig {
    fn from(config: &HttpConfig) -> Self {
        Self {
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            pool_idle_timeout: Duration::from_secs(90),
            connect_timeout: config.connect_timeout(),
            tcp_keepalive: Duration::from_secs(60),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Build the pooled client for `config`
pub fn create_http_client(config: &HttpConfig) -> Result<Client> {
    let pool = HttpClientPoolConfig::from(config);
    debug!(
        timeout_secs = pool.timeout.as_secs(),
        max_idle = pool.pool_max_idle_per_host,
        "Creating HTTP client"
    );

    ClientBuilder::new()
        .pool_max_idle_per_host(pool.pool_max_idle_per_host)
        .pool_idle_timeout(pool.pool_idle_timeout)
        .timeout(pool.timeout)
        .connect_timeout(pool.connect_timeout)
        .tcp_keepalive(pool.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(pool.user_agent)
        .build()
        .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))
}
