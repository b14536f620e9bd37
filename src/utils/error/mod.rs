//! Error handling for the API client
//!
//! This module defines the error type used throughout the client. Runtime
//! request failures never surface as `ClientError` on the public request
//! surface; they are folded into a failed `ResponseEnvelope` instead.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{ClientError, Result};
