//! Mock [`ListingSource`] with scripted results and external event control.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::adapter::{ListingEvent, ListingSource};
use crate::domain::RawListing;
use crate::error::{Result, StoreError};

/// External control handle for a [`ScriptedSource`] subscription.
///
/// Tests use it to deliver insert events on demand and to drop the
/// channel, simulating a lost subscription.
#[derive(Clone, Default)]
pub struct SourceHandle {
    sender: Arc<Mutex<Option<mpsc::Sender<ListingEvent>>>>,
}

impl SourceHandle {
    /// Deliver one insert event. Returns false if no subscription is
    /// open or the receiver is gone.
    pub async fn insert(&self, raw: RawListing) -> bool {
        let sender = self.sender.lock().clone();
        match sender {
            Some(tx) => tx.send(ListingEvent::Inserted(raw)).await.is_ok(),
            None => false,
        }
    }

    /// Drop the current subscription channel.
    pub fn close(&self) {
        self.sender.lock().take();
    }

    /// Whether a subscription channel is currently open.
    pub fn is_open(&self) -> bool {
        self.sender.lock().is_some()
    }
}

/// A mock listing source with scripted load and subscribe results.
///
/// Each call pops the next scripted result; exhausted queues default to
/// success (an empty load, an open subscription).
pub struct ScriptedSource {
    load_results: Mutex<VecDeque<Result<Vec<RawListing>>>>,
    subscribe_failures: Mutex<VecDeque<StoreError>>,
    handle: SourceHandle,
    subscribe_count: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            load_results: Mutex::new(VecDeque::new()),
            subscribe_failures: Mutex::new(VecDeque::new()),
            handle: SourceHandle::default(),
            subscribe_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Script the result of the next `load()` call.
    pub fn with_load(self, result: Result<Vec<RawListing>>) -> Self {
        self.load_results.lock().push_back(result);
        self
    }

    /// Script a bulk load of the given raw listings.
    pub fn with_listings(self, listings: Vec<RawListing>) -> Self {
        self.with_load(Ok(listings))
    }

    /// Script a failing bulk load.
    pub fn with_load_failure(self) -> Self {
        self.with_load(Err(StoreError::LoadFailed("scripted failure".into()).into()))
    }

    /// Script the next `subscribe()` call to fail before succeeding.
    pub fn with_subscribe_failure(self) -> Self {
        self.subscribe_failures
            .lock()
            .push_back(StoreError::SubscribeFailed("scripted failure".into()));
        self
    }

    /// The control handle for delivering events.
    pub fn handle(&self) -> SourceHandle {
        self.handle.clone()
    }

    /// Number of `subscribe()` calls made so far.
    pub fn subscribe_count(&self) -> u32 {
        self.subscribe_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingSource for ScriptedSource {
    async fn load(&self) -> Result<Vec<RawListing>> {
        self.load_results.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<ListingEvent>> {
        self.subscribe_count.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.subscribe_failures.lock().pop_front() {
            return Err(failure.into());
        }
        let (tx, rx) = mpsc::channel(32);
        *self.handle.sender.lock() = Some(tx);
        Ok(rx)
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
