//! Batch coalescing configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Debounce window in milliseconds, measured from a batch's first member
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
    /// Member count that flushes a batch without waiting for the window
    #[serde(default = "default_max_batch_size")]
    pub max_size: usize,
    /// Route plain GET calls through the coordinator as one-member batches
    #[serde(default)]
    pub coalesce_single_reads: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_batch_delay_ms(),
            max_size: default_max_batch_size(),
            coalesce_single_reads: false,
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_coalesce_single_reads(mut self, enabled: bool) -> Self {
        self.coalesce_single_reads = enabled;
        self
    }

    /// Merge batch configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.delay_ms != default_batch_delay_ms() {
            self.delay_ms = other.delay_ms;
        }
        if other.max_size != default_max_batch_size() {
            self.max_size = other.max_size;
        }
        if other.coalesce_single_reads {
            self.coalesce_single_reads = true;
        }
        self
    }
}
