//! Cache store collaborator

use super::types::{CacheStats, EntryOptions};
use crate::core::request::ResponseEnvelope;
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;

/// Computes the value for a cache miss
pub type Producer = BoxFuture<'static, ResponseEnvelope>;

/// Shared response store with tag-based invalidation.
///
/// Implementations serialize concurrent writes to the same key. `get_or_set`
/// must run at most one producer per key at a time and hand its result to
/// every concurrent caller; failed envelopes are returned but never stored.
#[async_trait]
pub trait CacheStore: Send + Sync + fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<ResponseEnvelope>>;

    async fn set(&self, key: &str, value: ResponseEnvelope, options: EntryOptions) -> Result<()>;

    async fn get_or_set(
        &self,
        key: &str,
        producer: Producer,
        options: EntryOptions,
    ) -> Result<ResponseEnvelope>;

    /// Remove every entry carrying `tag`, returning how many were removed
    async fn invalidate_by_tag(&self, tag: &str) -> Result<usize>;

    /// Remove a single entry, returning whether it was present
    async fn invalidate(&self, key: &str) -> Result<bool>;

    async fn clear(&self) -> Result<()>;

    fn stats(&self) -> CacheStats;
}
