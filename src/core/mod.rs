//! Core request pipeline
//!
//! - **request**: request descriptors and the response envelope
//! - **executor**: single request execution over a `Transport`
//! - **cache_manager**: cache key derivation, stores and the caching facade
//! - **batch**: time-windowed coalescing of concurrent reads

pub mod batch;
pub mod cache_manager;
pub mod executor;
pub mod request;
