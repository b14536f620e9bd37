//! Request descriptor types

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

/// Header map as sent by callers. Names compare case-insensitively downstream.
pub type Headers = HashMap<String, String>;

/// HTTP methods the backend API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Only reads are cached or coalesced
    pub fn is_read(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multipart form field
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            bytes: Bytes::from(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(serde_json::Value),
    /// Raw bytes; the JSON content type is dropped
    Binary {
        bytes: Bytes,
        content_type: Option<String>,
    },
    /// Multipart form; the transport sets its own boundary header
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Whether the default JSON content type applies to this body
    pub fn is_json(&self) -> bool {
        matches!(self, RequestBody::Json(_))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

/// Per-request cache settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheOptions {
    pub enabled: bool,
    /// Entry lifetime; `None` or zero falls back to the configured default
    pub ttl: Option<Duration>,
    /// Labels for bulk invalidation, never part of the key
    pub tags: BTreeSet<String>,
    /// Explicit cache key, used verbatim
    pub key: Option<String>,
}

impl CacheOptions {
    /// Caching enabled with the default TTL and no tags
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Effective TTL after applying the fallback
    pub fn resolved_ttl(&self, default_ttl: Duration) -> Duration {
        match self.ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => default_ttl,
        }
    }
}

/// Which batch partition a read belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuthRequirement {
    Auth,
    Public,
}

impl AuthRequirement {
    pub fn from_flag(require_auth: bool) -> Self {
        if require_auth {
            AuthRequirement::Auth
        } else {
            AuthRequirement::Public
        }
    }

    /// Batch key string
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthRequirement::Auth => "auth",
            AuthRequirement::Public => "public",
        }
    }
}

impl fmt::Display for AuthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by the single-request entry points
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<RequestBody>,
    pub require_auth: bool,
    pub cache: CacheOptions,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            headers: Headers::new(),
            body: None,
            require_auth: true,
            cache: CacheOptions::default(),
        }
    }
}

/// A single call to the backend API. Immutable once submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Caller-assigned id, unique within one batch submission
    pub id: String,
    pub endpoint: String,
    pub method: Method,
    pub headers: Headers,
    pub body: Option<RequestBody>,
    pub require_auth: bool,
    pub cache: CacheOptions,
}

impl RequestDescriptor {
    pub fn new(id: impl Into<String>, method: Method, endpoint: impl Into<String>) -> Self {
        Self::from_options(
            id,
            endpoint,
            RequestOptions {
                method,
                ..Default::default()
            },
        )
    }

    pub fn from_options(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        options: RequestOptions,
    ) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            method: options.method,
            headers: options.headers,
            body: options.body,
            require_auth: options.require_auth,
            cache: options.cache,
        }
    }

    pub fn get(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(id, Method::Get, endpoint)
    }

    pub fn post(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(id, Method::Post, endpoint)
    }

    pub fn put(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(id, Method::Put, endpoint)
    }

    pub fn patch(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(id, Method::Patch, endpoint)
    }

    pub fn delete(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(id, Method::Delete, endpoint)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_auth(mut self, require_auth: bool) -> Self {
        self.require_auth = require_auth;
        self
    }

    /// Shorthand for `with_auth(false)`
    pub fn public(self) -> Self {
        self.with_auth(false)
    }

    pub fn with_cache(mut self, cache: CacheOptions) -> Self {
        self.cache = cache;
        self
    }

    /// GET with caching enabled
    pub fn is_cacheable(&self) -> bool {
        self.method.is_read() && self.cache.enabled
    }

    pub fn auth_requirement(&self) -> AuthRequirement {
        AuthRequirement::from_flag(self.require_auth)
    }
}
