//! 访问记录器
//!
//! A single background worker drains a bounded channel of visits and calls
//! `MappingStore::increment_visit` for each one. Senders never block: when
//! the queue is full the visit is dropped and logged. A failed write is
//! logged and that visit is dropped too.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::storage::MappingStore;

/// 默认队列容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// One resolved redirect waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub short_id: String,
    pub at: DateTime<Utc>,
}

pub struct VisitRecorder {
    sender: ArcSwapOption<mpsc::Sender<Visit>>,
    /// visits sent but not yet applied to the store
    pending: Arc<AtomicUsize>,
    /// visits rejected because the queue was full
    dropped: AtomicU64,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl VisitRecorder {
    /// Spawn the worker with [`DEFAULT_QUEUE_CAPACITY`]
    pub fn start(store: Arc<dyn MappingStore>) -> Arc<Self> {
        Self::with_capacity(store, DEFAULT_QUEUE_CAPACITY)
    }

    /// Spawn the worker on the current tokio runtime, queueing at most
    /// `capacity` unwritten visits
    pub fn with_capacity(store: Arc<dyn MappingStore>, capacity: usize) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let pending = Arc::new(AtomicUsize::new(0));

        let worker = tokio::spawn(Self::run(store, rx, Arc::clone(&pending)));

        Arc::new(Self {
            sender: ArcSwapOption::from_pointee(tx),
            pending,
            dropped: AtomicU64::new(0),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Queue a visit; returns immediately
    pub fn record(&self, short_id: &str, at: DateTime<Utc>) {
        let guard = self.sender.load();
        let Some(sender) = guard.as_ref() else {
            debug!("VisitRecorder: stopped, dropping visit for {}", short_id);
            return;
        };

        self.pending.fetch_add(1, Ordering::AcqRel);
        let visit = Visit {
            short_id: short_id.to_string(),
            at,
        };
        match sender.try_send(visit) {
            Ok(()) => {}
            Err(TrySendError::Full(visit)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "VisitRecorder: queue full, dropping visit for {}",
                    visit.short_id
                );
            }
            Err(TrySendError::Closed(visit)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                warn!(
                    "VisitRecorder: worker gone, dropping visit for {}",
                    visit.short_id
                );
            }
        }
    }

    /// Number of queued visits not yet written
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Visits dropped so far because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Wait until every visit queued so far has been applied
    pub async fn wait_idle(&self) {
        while self.pending() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Stop accepting visits and wait for the worker to drain the queue
    pub async fn shutdown(&self) {
        // dropping the last sender closes the channel once the queue is empty
        self.sender.store(None);

        if let Some(worker) = self.worker.lock().await.take()
            && let Err(e) = worker.await
        {
            warn!("VisitRecorder: worker ended abnormally: {}", e);
        }
        debug!("VisitRecorder: shut down");
    }

    async fn run(
        store: Arc<dyn MappingStore>,
        mut rx: mpsc::Receiver<Visit>,
        pending: Arc<AtomicUsize>,
    ) {
        while let Some(visit) = rx.recv().await {
            match store.increment_visit(&visit.short_id, visit.at).await {
                Ok(()) => trace!("VisitRecorder: recorded visit for {}", visit.short_id),
                Err(e) => warn!(
                    "VisitRecorder: failed to record visit for {}: {}",
                    visit.short_id, e
                ),
            }
            pending.fetch_sub(1, Ordering::AcqRel);
        }
        debug!("VisitRecorder: channel closed, worker exiting");
    }
}
