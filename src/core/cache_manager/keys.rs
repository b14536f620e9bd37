//! Cache key derivation

use crate::core::request::{Method, RequestBody, RequestDescriptor};
use sha2::{Digest, Sha256};

/// Hex characters of the body digest kept in the key
const BODY_HASH_LEN: usize = 16;

/// Computes deterministic cache keys.
///
/// Keys have the form `METHOD:endpoint:hash`, where `hash` is a short SHA-256
/// prefix of the serialized body (empty without a body). JSON object keys are
/// serialized in sorted order, so equal bodies always hash equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheKeyDeriver;

impl CacheKeyDeriver {
    pub fn derive(
        endpoint: &str,
        method: Method,
        body: Option<&RequestBody>,
        key_override: Option<&str>,
    ) -> String {
        if let Some(key) = key_override {
            return key.to_string();
        }

        let hash = body.map(Self::hash_body).unwrap_or_default();
        format!("{}:{}:{}", method, endpoint, hash)
    }

    pub fn derive_for(request: &RequestDescriptor) -> String {
        Self::derive(
            &request.endpoint,
            request.method,
            request.body.as_ref(),
            request.cache.key.as_deref(),
        )
    }

    fn hash_body(body: &RequestBody) -> String {
        let mut hasher = Sha256::new();
        match body {
            RequestBody::Json(value) => hasher.update(value.to_string().as_bytes()),
            RequestBody::Binary { bytes, .. } => hasher.update(bytes),
            RequestBody::Multipart(parts) => {
                for part in parts {
                    hasher.update(part.name.as_bytes());
                    hasher.update([0u8]);
                    if let Some(file_name) = &part.file_name {
                        hasher.update(file_name.as_bytes());
                    }
                    hasher.update([0u8]);
                    hasher.update(&part.bytes);
                }
            }
        }

        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(BODY_HASH_LEN);
        digest
    }
}
