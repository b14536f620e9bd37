//! Response cache
//!
//! Cache-aside layer for GET reads: deterministic key derivation, the
//! `CacheStore` collaborator with tag-based invalidation, its in-memory
//! implementation, and the facade that routes cacheable requests through it.

mod facade;
mod keys;
mod memory;
mod store;
pub mod types;


pub use facade::CachingFacade;
pub use keys::CacheKeyDeriver;
pub use memory::MemoryCacheStore;
pub use store::{CacheStore, Producer};
pub use types::{AtomicCacheStats, CacheStats, EntryOptions};
