//! Client builder

use super::client::{ApiClient, ClientInner};
use crate::auth::{AuthHeaderBuilder, IdentityProvider, StaticIdentityProvider};
use crate::config::ClientConfig;
use crate::core::batch::BatchCoordinator;
use crate::core::cache_manager::{CacheStore, CachingFacade, MemoryCacheStore};
use crate::core::executor::RequestExecutor;
use crate::utils::error::Result;
use crate::utils::net::{ReqwestTransport, Transport};
use std::sync::Arc;
use tracing::info;

/// Builder for `ApiClient`. Unset collaborators fall back to a reqwest
/// transport, an anonymous identity and the in-memory cache store.
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    cache_store: Option<Arc<dyn CacheStore>>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.http.base_url = base_url.into();
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Validate the configuration and assemble the client
    pub fn build(self) -> Result<ApiClient> {
        let config = self.config;
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config.http)?),
        };
        let identity_provider = self
            .identity_provider
            .unwrap_or_else(|| Arc::new(StaticIdentityProvider::anonymous()));
        let store = self
            .cache_store
            .unwrap_or_else(|| Arc::new(MemoryCacheStore::new(&config.cache)));

        let auth = AuthHeaderBuilder::new(identity_provider, &config.auth);
        let executor = Arc::new(RequestExecutor::new(transport, auth, &config.http));
        let facade = Arc::new(CachingFacade::new(
            executor,
            store.clone(),
            config.cache.default_ttl(),
        ));
        let coordinator = BatchCoordinator::new(facade.clone(), &config.batch);

        info!(
            base_url = %config.http.base_url,
            batch_delay_ms = config.batch.delay_ms,
            max_batch_size = config.batch.max_size,
            coalesce_single_reads = config.batch.coalesce_single_reads,
            "API client created"
        );

        Ok(ApiClient::from_inner(ClientInner {
            config,
            facade,
            coordinator,
            store,
        }))
    }
}
