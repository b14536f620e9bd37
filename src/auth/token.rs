//! Opaque bearer token derivation

use super::identity::Identity;
use crate::config::AuthConfig;
use crate::utils::error::{ClientError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Claims carried by the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_identity(identity: &Identity, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            iat: now,
            exp: now.saturating_add(lifetime),
        }
    }
}

/// Encodes identities into tokens.
///
/// With a secret the token is an HS256 JWT; without one it is the unsigned
/// base64url encoding of the JSON claims.
#[derive(Clone)]
pub struct TokenEncoder {
    keys: Option<(EncodingKey, DecodingKey)>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("signed", &self.keys.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenEncoder {
    pub fn new(config: &AuthConfig) -> Self {
        let keys = config.token_secret.as_ref().map(|secret| {
            (
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            )
        });

        Self {
            keys,
            ttl: config.token_ttl(),
        }
    }

    pub fn is_signed(&self) -> bool {
        self.keys.is_some()
    }

    pub fn encode(&self, identity: &Identity) -> Result<String> {
        let claims = TokenClaims::for_identity(identity, self.ttl);

        match &self.keys {
            Some((encoding_key, _)) => {
                let header = Header::new(Algorithm::HS256);
                encode(&header, &claims, encoding_key).map_err(ClientError::Jwt)
            }
            None => {
                let json = serde_json::to_vec(&claims)?;
                Ok(URL_SAFE_NO_PAD.encode(json))
            }
        }
    }

    /// Read claims back out of a token produced by `encode`
    pub fn decode(&self, token: &str) -> Result<TokenClaims> {
        match &self.keys {
            Some((_, decoding_key)) => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_aud = false;
                let data = decode::<TokenClaims>(token, decoding_key, &validation)
                    .map_err(ClientError::Jwt)?;
                Ok(data.claims)
            }
            None => {
                let bytes = URL_SAFE_NO_PAD
                    .decode(token)
                    .map_err(|e| ClientError::auth(format!("Malformed token: {}", e)))?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }
}
