//! API client

use super::builder::ApiClientBuilder;
use crate::config::ClientConfig;
use crate::core::batch::{BatchCoordinator, BatchStats};
use crate::core::cache_manager::{CacheStats, CacheStore, CachingFacade};
use crate::core::request::{
    BatchResult, CacheOptions, Method, RequestDescriptor, RequestOptions, ResponseEnvelope,
};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Caching, batching client for the backend API.
///
/// Clones share the same cache, batch registry and transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
pub(super) struct ClientInner {
    pub config: ClientConfig,
    pub facade: Arc<CachingFacade>,
    pub coordinator: BatchCoordinator,
    pub store: Arc<dyn CacheStore>,
}

impl ApiClient {
    /// Client with default collaborators
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub(super) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Perform one request. The envelope carries any failure.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ResponseEnvelope {
        let id = format!("{} {}", options.method, endpoint);
        let request = RequestDescriptor::from_options(id, endpoint, options);
        self.dispatch(request).await
    }

    pub async fn get(&self, endpoint: &str) -> ResponseEnvelope {
        self.request(endpoint, RequestOptions::default()).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<Value>) -> ResponseEnvelope {
        self.request(endpoint, Self::with_body(Method::Post, body))
            .await
    }

    pub async fn put(&self, endpoint: &str, body: Option<Value>) -> ResponseEnvelope {
        self.request(endpoint, Self::with_body(Method::Put, body))
            .await
    }

    pub async fn patch(&self, endpoint: &str, body: Option<Value>) -> ResponseEnvelope {
        self.request(endpoint, Self::with_body(Method::Patch, body))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> ResponseEnvelope {
        let options = RequestOptions {
            method: Method::Delete,
            ..Default::default()
        };
        self.request(endpoint, options).await
    }

    /// GET through the cache. Caching is forced on whatever `cache.enabled` says.
    pub async fn get_cached(&self, endpoint: &str, cache: CacheOptions) -> ResponseEnvelope {
        let options = RequestOptions {
            cache: CacheOptions {
                enabled: true,
                ..cache
            },
            ..Default::default()
        };
        self.request(endpoint, options).await
    }

    /// Submit requests for coalesced execution. See `BatchCoordinator::submit_batch`.
    pub async fn batch(&self, requests: Vec<RequestDescriptor>) -> Result<Vec<BatchResult>> {
        self.inner.coordinator.submit_batch(requests).await
    }

    /// Drop every cached entry carrying any of `tags`; returns how many went
    pub async fn invalidate_cache<I, S>(&self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.facade.invalidate_by_tags(tags).await
    }

    pub async fn clear_cache(&self) -> Result<()> {
        self.inner.store.clear().await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.store.stats()
    }

    pub fn batch_stats(&self) -> BatchStats {
        self.inner.coordinator.stats()
    }

    async fn dispatch(&self, request: RequestDescriptor) -> ResponseEnvelope {
        if self.inner.config.batch.coalesce_single_reads && request.method.is_read() {
            debug!(id = %request.id, "Coalescing single read");
            return self.inner.coordinator.submit_one(request).await;
        }
        self.inner.facade.run(&request).await
    }

    fn with_body(method: Method, body: Option<Value>) -> RequestOptions {
        RequestOptions {
            method,
            body: body.map(Into::into),
            ..Default::default()
        }
    }
}
