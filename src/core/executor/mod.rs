//! Request execution
//!
//! Resolves a `RequestDescriptor` against the base URL, merges headers,
//! encodes the body, performs the exchange through the `Transport` and
//! normalizes whatever comes back into a `ResponseEnvelope`.

mod executor;
mod parsing;


pub use executor::RequestExecutor;
pub use parsing::parse_response;
