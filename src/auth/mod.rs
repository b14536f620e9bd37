//! Authentication context for outgoing requests
//!
//! Turns the current session identity into request headers. A missing
//! identity is not an error: the request simply goes out unauthenticated.

mod headers;
mod identity;
mod token;


pub use headers::AuthHeaderBuilder;
pub use identity::{Identity, IdentityProvider, StaticIdentityProvider};
pub use token::{TokenClaims, TokenEncoder};
