//! # cms-api-client
//!
//! Request client for the CMS backend API with a response cache and
//! time-windowed read coalescing.
//!
//! ## Features
//!
//! - **Uniform envelopes**: every call resolves to a `ResponseEnvelope`; network
//!   errors, error statuses and bad bodies never escape as `Err`
//! - **Auth headers**: tokens derived from the current session identity
//! - **Cache-aside reads**: concurrent identical GETs collapse to one network
//!   call, entries carry tags for bulk invalidation
//! - **Batching**: concurrent GET submissions inside the debounce window share
//!   one flush, and each caller gets back exactly its own results
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cms_api_client::{ApiClient, CacheOptions, ClientConfig, RequestDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::with_base_url("https://cms.example.com/api"))?;
//!
//!     let pages = client
//!         .get_cached("/pages", CacheOptions::enabled().with_tag("pages"))
//!         .await;
//!     if !pages.success {
//!         eprintln!("failed: {}", pages.error_message());
//!     }
//!
//!     let results = client
//!         .batch(vec![
//!             RequestDescriptor::get("startups", "/startups"),
//!             RequestDescriptor::get("content", "/content"),
//!         ])
//!         .await?;
//!     for result in results {
//!         println!("{}: {}", result.id, result.response.success);
//!     }
//!
//!     client.invalidate_cache(["pages"]).await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use auth::{
    AuthHeaderBuilder, Identity, IdentityProvider, StaticIdentityProvider, TokenClaims, TokenEncoder,
};
pub use config::ClientConfig;
pub use core::batch::{BatchCoordinator, BatchStats};
pub use core::cache_manager::{
    CacheKeyDeriver, CacheStats, CacheStore, CachingFacade, EntryOptions, MemoryCacheStore,
};
pub use core::executor::RequestExecutor;
pub use core::request::{
    AuthRequirement, BatchResult, CacheOptions, FormPart, Method, RequestBody, RequestDescriptor,
    RequestOptions, ResponseEnvelope,
};
pub use sdk::{ApiClient, ApiClientBuilder};
pub use utils::error::{ClientError, Result};
pub use utils::net::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Install a `tracing` subscriber at `info` unless `RUST_LOG` says otherwise
pub fn init() {
    utils::logging::init_tracing("info", false);
}
