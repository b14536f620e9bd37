//! Error types for the API client

use thiserror::Error;

/// Result type alias for the API client
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for the API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Cache store errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The same id appeared twice within one batch submission
    #[error("Duplicate request id in batch: {0}")]
    DuplicateRequestId(String),

    /// A batch flush ended without delivering results
    #[error("Batch dropped before completion: {0}")]
    BatchDropped(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
