//! Logging utilities
//!
//! Tracing subscriber setup and redaction of credential-bearing values
//! before they reach a log line.

mod sanitization;

pub use sanitization::{REDACTED, is_sensitive_header, redact_headers};

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set. Returns `false`
/// if a global subscriber was already installed.
pub fn init_tracing(default_level: &str, json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
