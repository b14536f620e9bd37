//! Network utilities
//!
//! The `Transport` seam every request goes through, and the pooled
//! `reqwest` client backing the default implementation.

pub mod http;
pub mod transport;

pub use http::{HttpClientPoolConfig, create_http_client};
pub use transport::{ReqwestTransport, Transport, TransportBody, TransportRequest, TransportResponse};
