//! Single request execution

use super::parsing::parse_response;
use crate::auth::AuthHeaderBuilder;
use crate::config::HttpConfig;
use crate::core::request::{Headers, RequestBody, RequestDescriptor, ResponseEnvelope};
use crate::utils::error::Result;
use crate::utils::logging::redact_headers;
use crate::utils::net::{Transport, TransportBody, TransportRequest};
use crate::utils::truncate_string;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Longest error text written to the log
const LOGGED_ERROR_LEN: usize = 200;

/// Performs one request and normalizes the outcome.
///
/// `execute` never fails: network errors, non-2xx statuses and undecodable
/// bodies all come back as failed envelopes.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    auth: AuthHeaderBuilder,
    base_url: String,
    default_headers: Headers,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>, auth: AuthHeaderBuilder, config: &HttpConfig) -> Self {
        Self {
            transport,
            auth,
            base_url: config.base_url.clone(),
            default_headers: config.default_headers.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthHeaderBuilder {
        &self.auth
    }

    pub async fn execute(&self, request: &RequestDescriptor) -> ResponseEnvelope {
        let prepared = match self.prepare(request).await {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(id = %request.id, endpoint = %request.endpoint, "Failed to prepare request: {}", e);
                return ResponseEnvelope::failure(e.to_string());
            }
        };

        debug!(
            method = %prepared.method,
            url = %prepared.url,
            headers = ?redact_headers(&prepared.headers),
            "Sending request"
        );

        let method = prepared.method;
        let url = prepared.url.clone();
        match self.transport.send(prepared).await {
            Ok(response) => {
                let status = response.status;
                let envelope = parse_response(response);
                if envelope.success {
                    debug!(%method, %url, status, "Received response");
                } else {
                    warn!(
                        %method,
                        %url,
                        status,
                        "Request failed: {}",
                        truncate_string(envelope.error_message(), LOGGED_ERROR_LEN)
                    );
                }
                envelope
            }
            Err(e) => {
                warn!(%method, %url, "Request failed: {}", e);
                ResponseEnvelope::failure(e.to_string())
            }
        }
    }

    /// Join an endpoint onto the base URL. Absolute URLs pass through.
    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }

        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn prepare(&self, request: &RequestDescriptor) -> Result<TransportRequest> {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        merge_headers(&mut headers, &self.default_headers);
        merge_headers(&mut headers, &request.headers);

        let auth_headers = self.auth.build(request.require_auth).await;
        merge_headers(&mut headers, &auth_headers);

        let body = match &request.body {
            None => None,
            Some(RequestBody::Json(value)) => {
                Some(TransportBody::Bytes(Bytes::from(serde_json::to_vec(value)?)))
            }
            Some(RequestBody::Binary {
                bytes,
                content_type,
            }) => {
                remove_header(&mut headers, CONTENT_TYPE);
                if let Some(content_type) = content_type {
                    headers.insert(CONTENT_TYPE.to_string(), content_type.clone());
                }
                Some(TransportBody::Bytes(bytes.clone()))
            }
            Some(RequestBody::Multipart(parts)) => {
                remove_header(&mut headers, CONTENT_TYPE);
                Some(TransportBody::Multipart(parts.clone()))
            }
        };

        Ok(TransportRequest {
            method: request.method,
            url: self.resolve_url(&request.endpoint),
            headers,
            body,
        })
    }
}

/// Insert `overrides` into `headers`, replacing names case-insensitively
fn merge_headers(headers: &mut Headers, overrides: &Headers) {
    for (name, value) in overrides {
        remove_header(headers, name);
        headers.insert(name.clone(), value.clone());
    }
}

fn remove_header(headers: &mut Headers, name: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
}
