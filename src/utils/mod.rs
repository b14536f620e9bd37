//! Utility modules for the API client
//!
//! - **error**: Error types and helpers
//! - **logging**: Tracing setup and log sanitization
//! - **net**: HTTP transport and client construction

pub mod error; // Error handling
pub mod logging; // Logging & redaction
pub mod net; // Network & transport

pub use error::{ClientError, Result};
pub use logging::{init_tracing, redact_headers};
pub use net::{ReqwestTransport, Transport, TransportBody, TransportRequest, TransportResponse};

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
