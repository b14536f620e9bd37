//! Batch coordinator

use super::types::{AtomicBatchStats, BatchStats, PendingBatch};
use crate::config::BatchConfig;
use crate::core::cache_manager::CachingFacade;
use crate::core::request::{AuthRequirement, BatchResult, RequestDescriptor, ResponseEnvelope};
use crate::utils::error::{ClientError, Result};
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// Accumulates concurrent reads into time-windowed batches.
///
/// Each coordinator owns its registry of open batches, one per
/// `AuthRequirement`. A batch leaves the registry before any of its members
/// runs, so nobody can join a batch that is already flushing.
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    facade: Arc<CachingFacade>,
    delay: Duration,
    max_size: usize,
    open: Mutex<HashMap<AuthRequirement, PendingBatch>>,
    next_batch_id: AtomicU64,
    stats: AtomicBatchStats,
}

type Receiver = oneshot::Receiver<Vec<ResponseEnvelope>>;

impl BatchCoordinator {
    pub fn new(facade: Arc<CachingFacade>, config: &BatchConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                facade,
                delay: config.delay(),
                max_size: config.max_size.max(1),
                open: Mutex::new(HashMap::new()),
                next_batch_id: AtomicU64::new(1),
                stats: AtomicBatchStats::default(),
            }),
        }
    }

    /// Submit a list of requests and wait for all of their responses.
    ///
    /// GET members join the open batch for their auth requirement (or open
    /// one); everything else runs immediately. The result holds one entry per
    /// submitted request, in submission order. Member failures are carried in
    /// their envelopes; `Err` is reserved for duplicate ids and for a flush
    /// that never delivered.
    pub async fn submit_batch(&self, requests: Vec<RequestDescriptor>) -> Result<Vec<BatchResult>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        ensure_unique_ids(&requests)?;

        let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();
        let total = requests.len();

        let mut reads: BTreeMap<AuthRequirement, (Vec<usize>, Vec<RequestDescriptor>)> =
            BTreeMap::new();
        let mut mutations = Vec::new();
        for (position, request) in requests.into_iter().enumerate() {
            if request.method.is_read() {
                let (positions, members) = reads.entry(request.auth_requirement()).or_default();
                positions.push(position);
                members.push(request);
            } else {
                mutations.push((position, request));
            }
        }

        // Admission is synchronous: every read is registered before anything
        // below yields.
        let receivers: Vec<(Vec<usize>, Receiver)> = reads
            .into_iter()
            .map(|(key, (positions, members))| (positions, self.admit(key, members)))
            .collect();

        let facade = &self.shared.facade;
        let immediate = join_all(mutations.iter().map(|(position, request)| async move {
            debug!(id = %request.id, method = %request.method, "Dispatching mutation immediately");
            (*position, facade.run(request).await)
        }));
        let batched = join_all(
            receivers
                .into_iter()
                .map(|(positions, receiver)| async move { (positions, receiver.await) }),
        );
        let (immediate, batched) = tokio::join!(immediate, batched);

        let mut responses: Vec<Option<ResponseEnvelope>> = vec![None; total];
        for (position, response) in immediate {
            responses[position] = Some(response);
        }
        for (positions, received) in batched {
            let received = received.map_err(|_| {
                ClientError::BatchDropped("flush ended without delivering results".to_string())
            })?;
            for (position, response) in positions.into_iter().zip(received) {
                responses[position] = Some(response);
            }
        }

        ids.into_iter()
            .zip(responses)
            .map(|(id, response)| match response {
                Some(response) => Ok(BatchResult::new(id, response)),
                None => Err(ClientError::BatchDropped(format!("no response for {}", id))),
            })
            .collect()
    }

    /// Submit a single request. Reads coalesce with whatever batch is open
    /// for their auth requirement; mutations run immediately.
    pub async fn submit_one(&self, request: RequestDescriptor) -> ResponseEnvelope {
        if !request.method.is_read() {
            return self.shared.facade.run(&request).await;
        }

        let receiver = self.admit(request.auth_requirement(), vec![request]);
        match receiver.await {
            Ok(mut responses) => responses
                .pop()
                .unwrap_or_else(|| ResponseEnvelope::failure("batch returned no response")),
            Err(_) => ResponseEnvelope::failure(
                ClientError::BatchDropped("flush ended without delivering results".to_string())
                    .to_string(),
            ),
        }
    }

    /// Number of batches waiting for their flush
    pub fn pending_batches(&self) -> usize {
        self.shared.open.lock().len()
    }

    /// Members waiting in the open batch for `key`
    pub fn pending_members(&self, key: AuthRequirement) -> usize {
        self.shared
            .open
            .lock()
            .get(&key)
            .map(PendingBatch::len)
            .unwrap_or(0)
    }

    pub fn stats(&self) -> BatchStats {
        self.shared.stats.snapshot(self.pending_batches())
    }

    pub fn delay(&self) -> Duration {
        self.shared.delay
    }

    pub fn max_size(&self) -> usize {
        self.shared.max_size
    }

    fn admit(&self, key: AuthRequirement, members: Vec<RequestDescriptor>) -> Receiver {
        let shared = &self.shared;
        let count = members.len();
        let mut open = shared.open.lock();

        let batch = match open.entry(key) {
            Entry::Occupied(entry) => {
                shared.stats.joins.fetch_add(1, Ordering::Relaxed);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let id = shared.next_batch_id.fetch_add(1, Ordering::Relaxed);
                shared.stats.batches_opened.fetch_add(1, Ordering::Relaxed);
                debug!(batch_id = id, key = %key, "Opened batch");
                entry.insert(PendingBatch::new(id, key))
            }
        };

        let receiver = batch.join(members);
        debug!(batch_id = batch.id, key = %key, added = count, size = batch.len(), "Admitted batch members");

        let full = if batch.len() >= shared.max_size {
            open.remove(&key)
        } else {
            if batch.timer.is_none() {
                let batch_id = batch.id;
                let delay = shared.delay;
                let timer_shared = shared.clone();
                batch.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    timer_shared.flush_expired(key, batch_id).await;
                }));
            }
            None
        };
        drop(open);

        if let Some(mut full) = full {
            full.cancel_timer();
            shared.stats.size_triggered.fetch_add(1, Ordering::Relaxed);
            info!(batch_id = full.id, key = %key, size = full.len(), "Batch full, flushing early");
            let shared = shared.clone();
            tokio::spawn(async move { shared.flush(full).await });
        }

        receiver
    }
}

impl Shared {
    /// Timer path: flush only the batch generation that scheduled this timer
    async fn flush_expired(&self, key: AuthRequirement, batch_id: u64) {
        let batch = {
            let mut open = self.open.lock();
            if open.get(&key).map(|batch| batch.id) == Some(batch_id) {
                open.remove(&key)
            } else {
                None
            }
        };

        if let Some(mut batch) = batch {
            // Detach our own handle; aborting it would cancel this task
            batch.timer.take();
            self.stats.timer_triggered.fetch_add(1, Ordering::Relaxed);
            self.flush(batch).await;
        }
    }

    async fn flush(&self, batch: PendingBatch) {
        let PendingBatch {
            id,
            key,
            members,
            sinks,
            opened_at,
            ..
        } = batch;

        debug!(
            batch_id = id,
            key = %key,
            members = members.len(),
            waited_ms = opened_at.elapsed().as_millis() as u64,
            "Flushing batch"
        );

        let responses = join_all(members.iter().map(|member| self.facade.run(member))).await;

        self.stats.batches_flushed.fetch_add(1, Ordering::Relaxed);
        self.stats
            .members_flushed
            .fetch_add(members.len() as u64, Ordering::Relaxed);

        for sink in sinks {
            let slice = sink
                .slots
                .iter()
                .map(|&slot| {
                    responses
                        .get(slot)
                        .cloned()
                        .unwrap_or_else(|| ResponseEnvelope::failure("missing batch response"))
                })
                .collect();
            // A caller that stopped waiting has dropped its receiver
            let _ = sink.sender.send(slice);
        }
    }
}

fn ensure_unique_ids(requests: &[RequestDescriptor]) -> Result<()> {
    let mut seen = HashSet::with_capacity(requests.len());
    for request in requests {
        if !seen.insert(request.id.as_str()) {
            return Err(ClientError::DuplicateRequestId(request.id.clone()));
        }
    }
    Ok(())
}
