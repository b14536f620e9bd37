//! Envelope assertions

use cms_api_client::{BatchResult, ResponseEnvelope};

pub trait EnvelopeAssertions {
    fn assert_success(&self);

    fn assert_failure_containing(&self, text: &str);

    /// URL echoed back by `RecordingTransport::echo`
    fn echoed_url(&self) -> String;
}

impl EnvelopeAssertions for ResponseEnvelope {
    fn assert_success(&self) {
        assert!(
            self.success,
            "Expected a successful envelope, got error: {}",
            self.error_message()
        );
    }

    fn assert_failure_containing(&self, text: &str) {
        assert!(!self.success, "Expected a failed envelope, got success");
        assert!(
            self.error_message().contains(text),
            "Expected error containing '{}', got '{}'",
            text,
            self.error_message()
        );
    }

    fn echoed_url(&self) -> String {
        self.data
            .as_ref()
            .and_then(|data| data["url"].as_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Ids of a batch result list, in order
pub fn ids(results: &[BatchResult]) -> Vec<&str> {
    results.iter().map(|result| result.id.as_str()).collect()
}
