//! Batch coordinator types

use crate::core::request::{AuthRequirement, RequestDescriptor, ResponseEnvelope};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One caller's view of a batch: the member slots it submitted and where
/// their responses go
#[derive(Debug)]
pub(crate) struct ResultSink {
    pub slots: Vec<usize>,
    pub sender: oneshot::Sender<Vec<ResponseEnvelope>>,
}

/// An open batch, alive from its first member until its flush
#[derive(Debug)]
pub(crate) struct PendingBatch {
    /// Generation id, unique per coordinator
    pub id: u64,
    pub key: AuthRequirement,
    pub members: Vec<RequestDescriptor>,
    pub sinks: Vec<ResultSink>,
    pub timer: Option<JoinHandle<()>>,
    pub opened_at: Instant,
}

impl PendingBatch {
    pub fn new(id: u64, key: AuthRequirement) -> Self {
        Self {
            id,
            key,
            members: Vec::new(),
            sinks: Vec::new(),
            timer: None,
            opened_at: Instant::now(),
        }
    }

    /// Append one caller's members; the receiver yields exactly their
    /// responses, in the order given
    pub fn join(
        &mut self,
        members: Vec<RequestDescriptor>,
    ) -> oneshot::Receiver<Vec<ResponseEnvelope>> {
        let (sender, receiver) = oneshot::channel();
        let start = self.members.len();
        let slots = (start..start + members.len()).collect();
        self.members.extend(members);
        self.sinks.push(ResultSink { slots, sender });
        receiver
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Abort the debounce timer, if one is still scheduled
    pub fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Atomic batch statistics
#[derive(Debug, Default)]
pub struct AtomicBatchStats {
    pub batches_opened: AtomicU64,
    pub batches_flushed: AtomicU64,
    pub size_triggered: AtomicU64,
    pub timer_triggered: AtomicU64,
    pub members_flushed: AtomicU64,
    /// Submissions that joined an already open batch
    pub joins: AtomicU64,
}

impl AtomicBatchStats {
    pub fn snapshot(&self, open_batches: usize) -> BatchStats {
        BatchStats {
            batches_opened: self.batches_opened.load(Ordering::Relaxed),
            batches_flushed: self.batches_flushed.load(Ordering::Relaxed),
            size_triggered: self.size_triggered.load(Ordering::Relaxed),
            timer_triggered: self.timer_triggered.load(Ordering::Relaxed),
            members_flushed: self.members_flushed.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            open_batches,
        }
    }
}

/// Batch statistics snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub batches_opened: u64,
    pub batches_flushed: u64,
    pub size_triggered: u64,
    pub timer_triggered: u64,
    pub members_flushed: u64,
    pub joins: u64,
    pub open_batches: usize,
}

impl BatchStats {
    /// Mean members per flushed batch
    pub fn average_batch_size(&self) -> f64 {
        if self.batches_flushed == 0 {
            0.0
        } else {
            self.members_flushed as f64 / self.batches_flushed as f64
        }
    }
}
