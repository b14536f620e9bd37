//! Transport seam
//!
//! `Transport` is the network primitive the executor calls. It is opaque to
//! the caching and batching layers; tests substitute an in-memory one.

use crate::config::HttpConfig;
use crate::core::request::{FormPart, Headers, Method};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::fmt;

use super::http::create_http_client;

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum TransportBody {
    Bytes(Bytes),
    Multipart(Vec<FormPart>),
}

/// Fully resolved outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<TransportBody>,
}

impl TransportRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as returned by the network
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// JSON response with the given status
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(
            status,
            Some("application/json".to_string()),
            value.to_string(),
        )
    }

    /// Plain-text response with the given status
    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self::new(status, Some("text/plain".to_string()), text.into())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false)
    }
}

/// Network call primitive
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Perform one HTTP exchange. `Err` means no response was obtained.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// `Transport` backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
        })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn form(parts: Vec<FormPart>) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            let mut field = Part::bytes(part.bytes.to_vec());
            if let Some(file_name) = part.file_name {
                field = field.file_name(file_name);
            }
            if let Some(content_type) = part.content_type {
                field = field.mime_str(&content_type).map_err(|e| {
                    ClientError::invalid_request(format!(
                        "Invalid content type for form field '{}': {}",
                        part.name, e
                    ))
                })?;
            }
            form = form.part(part.name, field);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Some(TransportBody::Bytes(bytes)) => builder.body(bytes),
            Some(TransportBody::Multipart(parts)) => builder.multipart(Self::form(parts)?),
            None => builder,
        };

        let response = builder.send().await.map_err(ClientError::from_transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
