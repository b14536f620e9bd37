//! Integration tests for cms-api-client
//!
//! These tests drive the public client surface with a recording transport,
//! and the reqwest transport against a local mock server.

pub mod batch_tests;
pub mod cache_tests;
pub mod config_validation_tests;
pub mod http_transport_tests;
