//! Configuration data models
//!
//! This module defines all configuration structures used by the client.

#![allow(missing_docs)]

pub mod auth;
pub mod batch;
pub mod cache;
pub mod http;

// Re-export all configuration types
pub use auth::*;
pub use batch::*;
pub use cache::*;
pub use http::*;

/// Default API base URL
pub fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

pub fn default_user_agent() -> String {
    format!("cms-api-client/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_pool_max_idle_per_host() -> usize {
    32
}

pub fn default_auth_header() -> String {
    "Authorization".to_string()
}

pub fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

/// Default token lifetime in seconds
pub fn default_token_ttl() -> u64 {
    3600 // 1 hour
}

/// Longest accepted token lifetime in seconds
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 3600;

/// Default cache TTL in seconds
pub fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

pub fn default_cache_max_entries() -> u64 {
    10_000
}

/// Default debounce window in milliseconds
pub fn default_batch_delay_ms() -> u64 {
    50
}

pub fn default_max_batch_size() -> usize {
    10
}
