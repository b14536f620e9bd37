//! Recording transport
//!
//! Stands in for the network in integration tests. Every request is kept
//! along with the tokio time it arrived, so tests can assert on both what
//! was sent and when.

use async_trait::async_trait;
use cms_api_client::{ClientError, Result, Transport, TransportRequest, TransportResponse};
use parking_lot::Mutex;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

type Responder = Arc<dyn Fn(&TransportRequest) -> Result<TransportResponse> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub request: TransportRequest,
    pub at: Instant,
}

#[derive(Clone)]
pub struct RecordingTransport {
    responder: Responder,
    latency: Duration,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl fmt::Debug for RecordingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingTransport")
            .field("calls", &self.calls.lock().len())
            .finish()
    }
}

impl RecordingTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&TransportRequest) -> Result<TransportResponse> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Echo the method and URL back inside a `{ "data": .. }` body
    pub fn echo() -> Self {
        Self::new(|request| {
            Ok(TransportResponse::json(
                200,
                &json!({
                    "data": { "method": request.method.as_str(), "url": request.url },
                    "message": "ok"
                }),
            ))
        })
    }

    /// Fail every request whose URL ends with `suffix`; echo the rest
    pub fn failing_on(suffix: &'static str) -> Self {
        let echo = Self::echo();
        Self::new(move |request| {
            if request.url.ends_with(suffix) {
                Err(ClientError::network("connection refused"))
            } else {
                (echo.responder)(request)
            }
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// How many requests hit a URL ending with `suffix`
    pub fn calls_to(&self, suffix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.request.url.ends_with(suffix))
            .count()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.calls.lock().push(Recorded {
            request: request.clone(),
            at: Instant::now(),
        });
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.responder)(&request)
    }
}
