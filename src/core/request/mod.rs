//! Request and response model
//!
//! Closed structures describing one call to the backend API and the uniform
//! envelope every call resolves to.

mod envelope;
mod types;


pub use envelope::{BatchResult, ResponseEnvelope};
pub use types::{
    AuthRequirement, CacheOptions, FormPart, Headers, Method, RequestBody, RequestDescriptor,
    RequestOptions,
};
