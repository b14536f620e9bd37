//! Uniform response envelope

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result of every request. Expected failures are carried here, never thrown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = serde_json::Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Success without a body (e.g. `204 No Content`)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn failure_with_data(error: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Error text, or an empty string on success
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    pub fn map<U, F>(self, f: F) -> ResponseEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ResponseEnvelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }
}

impl ResponseEnvelope<serde_json::Value> {
    /// Deserialize `data` into a caller type.
    ///
    /// A payload that does not fit `U` turns the envelope into a failure; the
    /// failure keeps no data since the raw value has the wrong shape.
    pub fn into_typed<U: DeserializeOwned>(self) -> ResponseEnvelope<U> {
        let ResponseEnvelope {
            success,
            data,
            error,
            message,
        } = self;

        match data {
            None => ResponseEnvelope {
                success,
                data: None,
                error,
                message,
            },
            Some(value) => match serde_json::from_value::<U>(value) {
                Ok(typed) => ResponseEnvelope {
                    success,
                    data: Some(typed),
                    error,
                    message,
                },
                Err(e) if success => ResponseEnvelope::failure(format!(
                    "Failed to parse response data: {}",
                    e
                ))
                .with_message(message),
                // Error bodies rarely match the success type
                Err(_) => ResponseEnvelope {
                    success,
                    data: None,
                    error,
                    message,
                },
            },
        }
    }
}

/// One member's outcome in a batch submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub id: String,
    pub response: ResponseEnvelope,
}

impl BatchResult {
    pub fn new(id: impl Into<String>, response: ResponseEnvelope) -> Self {
        Self {
            id: id.into(),
            response,
        }
    }
}
