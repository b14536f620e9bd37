//! API client module

mod builder;
mod client;


pub use builder::ApiClientBuilder;
pub use client::ApiClient;
