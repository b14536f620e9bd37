//! Helper functions for creating specific error types

use super::types::ClientError;

/// Helper functions for creating specific errors
impl ClientError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout(_) => true,
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Contract violations are programmer errors, not runtime conditions
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ClientError::DuplicateRequestId(_) | ClientError::InvalidRequest(_)
        )
    }

    /// Map a transport-level `reqwest` failure onto the client taxonomy
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::Network(error.to_string())
        } else {
            Self::Http(error)
        }
    }
}
