//! Validation trait definition

use crate::utils::error::ClientError;

/// Validation trait for configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), String>;

    /// Validate and tag a failure with the section it came from
    fn validate_section(&self, section: &str) -> Result<(), ClientError> {
        self.validate()
            .map_err(|e| ClientError::Config(format!("{} config error: {}", section, e)))
    }
}
