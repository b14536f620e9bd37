//! Time-windowed coalescing of concurrent reads
//!
//! Concurrent GET submissions that arrive within the debounce window share
//! one flush. Members are partitioned by auth requirement, executed in
//! parallel through the caching facade and routed back to the caller that
//! submitted them. Mutations are never deferred.

mod coordinator;
mod types;


pub use coordinator::BatchCoordinator;
pub use types::{AtomicBatchStats, BatchStats};
