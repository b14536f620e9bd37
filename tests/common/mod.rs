//! Common test utilities for cms-api-client
//!
//! - A `Transport` that records requests and answers from a closure
//! - Fixtures for clients, identities and request descriptors
//! - Envelope assertions

pub mod assertions;
pub mod transport;

pub use fixtures::{ClientFactory, RequestFactory};
pub use transport::RecordingTransport;
