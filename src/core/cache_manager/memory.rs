//! In-memory cache store
//!
//! Moka's async cache holds the responses with a per-entry TTL. Two DashMap
//! indices (tag -> keys, key -> tags) make tag invalidation O(K) in the
//! number of keys carrying the tag instead of a scan over every entry.
//! Entries moka drops on its own (expiry, capacity) leave the indices through
//! the eviction listener.

use super::store::{CacheStore, Producer};
use super::types::{AtomicCacheStats, CacheStats, EntryOptions};
use crate::config::CacheConfig;
use crate::core::request::ResponseEnvelope;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use moka::Expiry;
use moka::future::Cache;
use moka::notification::RemovalCause;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct CachedResponse {
    envelope: ResponseEnvelope,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, CachedResponse> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedResponse,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Tag membership for cached keys
#[derive(Debug, Default)]
struct TagIndex {
    /// tag -> keys carrying it
    by_tag: DashMap<String, HashSet<String>>,
    /// key -> its tags, used to unlink stale tag memberships
    tags_of: DashMap<String, BTreeSet<String>>,
}

impl TagIndex {
    fn link(&self, key: &str, tags: &BTreeSet<String>) {
        self.unlink(key);
        if tags.is_empty() {
            return;
        }

        for tag in tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
        self.tags_of.insert(key.to_string(), tags.clone());
    }

    fn unlink(&self, key: &str) {
        if let Some((_, tags)) = self.tags_of.remove(key) {
            for tag in tags {
                if let Some(mut keys) = self.by_tag.get_mut(&tag) {
                    keys.remove(key);
                }
                self.by_tag.remove_if(&tag, |_, keys| keys.is_empty());
            }
        }
    }

    fn clear(&self) {
        self.by_tag.clear();
        self.tags_of.clear();
    }
}

/// `CacheStore` kept in process memory
pub struct MemoryCacheStore {
    cache: Cache<String, CachedResponse>,
    tags: Arc<TagIndex>,
    stats: Arc<AtomicCacheStats>,
}

impl std::fmt::Debug for MemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheStore")
            .field("entry_count", &self.cache.entry_count())
            .field("tag_index_size", &self.tags.by_tag.len())
            .finish()
    }
}

impl MemoryCacheStore {
    pub fn new(config: &CacheConfig) -> Self {
        let tags = Arc::new(TagIndex::default());

        // Explicit removals unlink before touching the cache, and a
        // replacement is relinked by the writer.
        let listener_tags = tags.clone();
        let listener = move |key: Arc<String>, _value: CachedResponse, cause: RemovalCause| {
            if matches!(cause, RemovalCause::Expired | RemovalCause::Size) {
                listener_tags.unlink(&key);
            }
        };

        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryTtl)
            .eviction_listener(listener)
            .build();

        Self {
            cache,
            tags,
            stats: Arc::new(AtomicCacheStats::default()),
        }
    }

    /// Entry count after flushing moka's pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Keys currently indexed under `tag`
    pub fn keys_for_tag(&self, tag: &str) -> HashSet<String> {
        self.tags
            .by_tag
            .get(tag)
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<ResponseEnvelope>> {
        let result = self.cache.get(key).await.map(|cached| cached.envelope);
        if result.is_some() {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache hit");
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        }
        Ok(result)
    }

    async fn set(&self, key: &str, value: ResponseEnvelope, options: EntryOptions) -> Result<()> {
        let cached = CachedResponse {
            envelope: value,
            ttl: options.ttl,
        };
        self.cache.insert(key.to_string(), cached).await;
        self.tags.link(key, &options.tags);
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
        debug!(key, ttl_ms = options.ttl.as_millis() as u64, "Cached response");
        Ok(())
    }

    async fn get_or_set(
        &self,
        key: &str,
        producer: Producer,
        options: EntryOptions,
    ) -> Result<ResponseEnvelope> {
        let produced = AtomicBool::new(false);
        let ttl = options.ttl;

        // Moka runs one init per key and parks concurrent callers on it
        let result = self
            .cache
            .try_get_with(key.to_string(), async {
                produced.store(true, Ordering::Relaxed);
                let envelope = producer.await;
                if envelope.success {
                    Ok(CachedResponse { envelope, ttl })
                } else {
                    Err(envelope)
                }
            })
            .await;

        let ran_producer = produced.load(Ordering::Relaxed);
        if ran_producer {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache hit");
        }

        match result {
            Ok(cached) => {
                if ran_producer {
                    self.tags.link(key, &options.tags);
                    self.stats.inserts.fetch_add(1, Ordering::Relaxed);
                    debug!(key, ttl_ms = ttl.as_millis() as u64, "Cached response");
                }
                Ok(cached.envelope)
            }
            Err(failed) => {
                debug!(key, "Producer failed, response not cached");
                Ok(failed.as_ref().clone())
            }
        }
    }

    async fn invalidate_by_tag(&self, tag: &str) -> Result<usize> {
        // Removing the index entry first keeps a concurrent insert from
        // slipping a key in between the read and the removal.
        let Some((_, keys)) = self.tags.by_tag.remove(tag) else {
            return Ok(0);
        };

        let mut removed = 0usize;
        for key in keys {
            self.tags.unlink(&key);
            if self.cache.remove(&key).await.is_some() {
                removed += 1;
            }
        }

        self.stats
            .invalidations
            .fetch_add(removed as u64, Ordering::Relaxed);
        info!(tag, removed, "Invalidated cache entries by tag");
        Ok(removed)
    }

    async fn invalidate(&self, key: &str) -> Result<bool> {
        self.tags.unlink(key);
        let removed = self.cache.remove(key).await.is_some();
        if removed {
            self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        self.tags.clear();
        self.stats.reset();
        info!("Response cache cleared");
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.cache.entry_count())
    }
}
