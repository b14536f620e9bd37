//! Cache-aside facade over the executor

use super::keys::CacheKeyDeriver;
use super::store::CacheStore;
use super::types::EntryOptions;
use crate::core::executor::RequestExecutor;
use crate::core::request::{RequestDescriptor, ResponseEnvelope};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Routes cacheable reads through the store and everything else straight to
/// the executor
#[derive(Debug, Clone)]
pub struct CachingFacade {
    executor: Arc<RequestExecutor>,
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
}

impl CachingFacade {
    pub fn new(
        executor: Arc<RequestExecutor>,
        store: Arc<dyn CacheStore>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            executor,
            store,
            default_ttl,
        }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    pub async fn run(&self, request: &RequestDescriptor) -> ResponseEnvelope {
        if !request.is_cacheable() {
            return self.executor.execute(request).await;
        }

        let key = CacheKeyDeriver::derive_for(request);
        let options = EntryOptions::new(request.cache.resolved_ttl(self.default_ttl))
            .with_tags(request.cache.tags.iter().cloned());

        let executor = self.executor.clone();
        let owned = request.clone();
        let producer = Box::pin(async move { executor.execute(&owned).await });

        debug!(id = %request.id, key = %key, "Resolving cacheable request");
        match self.store.get_or_set(&key, producer, options).await {
            Ok(response) => response,
            Err(e) => {
                warn!(key = %key, "Cache store failed: {}", e);
                ResponseEnvelope::failure(e.to_string())
            }
        }
    }

    /// Invalidate every tag in turn, returning the total entries removed
    pub async fn invalidate_by_tags<I, S>(&self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for tag in tags {
            let tag = tag.as_ref();
            match self.store.invalidate_by_tag(tag).await {
                Ok(count) => removed += count,
                Err(e) => warn!(tag, "Tag invalidation failed: {}", e),
            }
        }
        removed
    }
}
