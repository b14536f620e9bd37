//! Authentication header configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the token
    #[serde(default = "default_auth_header")]
    pub header_name: String,
    /// Scheme prefix, e.g. `Bearer`. Empty sends the bare token.
    #[serde(default = "default_auth_scheme")]
    pub scheme: String,
    /// HS256 signing secret. Without one, tokens are unsigned base64 claims.
    #[serde(default)]
    pub token_secret: Option<String>,
    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("header_name", &self.header_name)
            .field("scheme", &self.scheme)
            .field(
                "token_secret",
                &self.token_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header_name: default_auth_header(),
            scheme: default_auth_scheme(),
            token_secret: None,
            token_ttl: default_token_ttl(),
        }
    }
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl)
    }

    /// Merge auth configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.header_name != default_auth_header() {
            self.header_name = other.header_name;
        }
        if other.scheme != default_auth_scheme() {
            self.scheme = other.scheme;
        }
        if other.token_secret.is_some() {
            self.token_secret = other.token_secret;
        }
        if other.token_ttl != default_token_ttl() {
            self.token_ttl = other.token_ttl;
        }
        self
    }
}
