//! Auth header construction

use super::identity::IdentityProvider;
use super::token::TokenEncoder;
use crate::config::AuthConfig;
use crate::core::request::Headers;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the auth header for a request from the current identity
#[derive(Debug, Clone)]
pub struct AuthHeaderBuilder {
    provider: Arc<dyn IdentityProvider>,
    encoder: TokenEncoder,
    header_name: String,
    scheme: String,
}

impl AuthHeaderBuilder {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: &AuthConfig) -> Self {
        Self {
            provider,
            encoder: TokenEncoder::new(config),
            header_name: config.header_name.clone(),
            scheme: config.scheme.clone(),
        }
    }

    pub fn encoder(&self) -> &TokenEncoder {
        &self.encoder
    }

    /// Headers for a request.
    ///
    /// Returns an empty map without consulting the identity provider when
    /// `require_auth` is false, and an empty map when nobody is signed in.
    pub async fn build(&self, require_auth: bool) -> Headers {
        let mut headers = Headers::new();
        if !require_auth {
            return headers;
        }

        let Some(identity) = self.provider.current_identity().await else {
            debug!("No identity available, sending request unauthenticated");
            return headers;
        };

        match self.encoder.encode(&identity) {
            Ok(token) => {
                let value = if self.scheme.is_empty() {
                    token
                } else {
                    format!("{} {}", self.scheme, token)
                };
                headers.insert(self.header_name.clone(), value);
            }
            Err(e) => {
                warn!(user_id = %identity.id, "Failed to encode auth token: {}", e);
            }
        }

        headers
    }
}
