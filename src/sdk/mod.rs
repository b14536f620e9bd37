//! Client SDK
//!
//! `ApiClient` is the entry point the rest of an application talks to. It
//! wires the executor, the caching facade and the batch coordinator together
//! and exposes them as plain async methods returning envelopes.

pub mod client;

pub use client::{ApiClient, ApiClientBuilder};
