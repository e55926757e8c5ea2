//! Live listing store.
//!
//! Owns the snapshot working set and the single write path into it: a
//! bulk load at startup followed by one subscriber task that applies
//! insert events in arrival order. Readers take atomic snapshots and
//! never block event delivery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::adapter::{ListingEvent, ListingSource};
use crate::config::StoreConfig;
use crate::domain::{Listing, ListingId, ListingSnapshot, ListingStatus, SnapshotStore};

/// The client-session view of the listing set, kept current by a
/// datastore subscription.
pub struct LiveListingStore {
    snapshots: Arc<SnapshotStore>,
    load_failed: Arc<AtomicBool>,
    arrivals: Arc<Mutex<Vec<(ListingId, Instant)>>>,
    arrival_window: Duration,
    subscriber: JoinHandle<()>,
}

impl LiveListingStore {
    /// Bulk-load the working set and start the subscriber task.
    ///
    /// A failed bulk load is non-fatal: the store starts empty with
    /// [`load_failed`](Self::load_failed) set, and inserts still apply.
    pub async fn start(source: Arc<dyn ListingSource>, config: &StoreConfig) -> Self {
        let snapshots = Arc::new(SnapshotStore::new());
        let load_failed = Arc::new(AtomicBool::new(false));
        let arrivals = Arc::new(Mutex::new(Vec::new()));
        let arrival_window = Duration::from_secs(config.new_arrival_window_secs);
        let resubscribe_delay = Duration::from_secs(config.resubscribe_delay_secs);

        match source.load().await {
            Ok(raws) => {
                let listings: Vec<Listing> = raws
                    .into_iter()
                    .filter_map(|raw| raw.normalize())
                    .filter(|l| l.status() == ListingStatus::Active)
                    .collect();
                info!(
                    count = listings.len(),
                    source = source.source_name(),
                    "Listings loaded"
                );
                snapshots.replace(listings);
            }
            Err(e) => {
                warn!(error = %e, "Bulk load failed; starting with empty snapshot");
                load_failed.store(true, Ordering::SeqCst);
            }
        }

        let subscriber = tokio::spawn(subscriber_loop(
            source,
            snapshots.clone(),
            arrivals.clone(),
            arrival_window,
            resubscribe_delay,
        ));

        Self {
            snapshots,
            load_failed,
            arrivals,
            arrival_window,
            subscriber,
        }
    }

    /// Capture the current working set atomically.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot {
        self.snapshots.snapshot()
    }

    /// Whether the initial bulk load failed. Non-fatal.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed.load(Ordering::SeqCst)
    }

    /// Ephemeral new-arrival signal: true while the listing is within
    /// its highlight window after insertion.
    #[must_use]
    pub fn is_new_arrival(&self, id: &ListingId) -> bool {
        let now = Instant::now();
        let mut arrivals = self.arrivals.lock();
        arrivals.retain(|(_, at)| now.duration_since(*at) < self.arrival_window);
        arrivals.iter().any(|(aid, _)| aid == id)
    }

    /// Number of listings currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Drop for LiveListingStore {
    fn drop(&mut self) {
        self.subscriber.abort();
    }
}

/// The single writer: receives insert events and prepends them. When the
/// subscription channel drops, resubscribes without touching the loaded
/// data; resubscribe failures retry after a delay.
async fn subscriber_loop(
    source: Arc<dyn ListingSource>,
    snapshots: Arc<SnapshotStore>,
    arrivals: Arc<Mutex<Vec<(ListingId, Instant)>>>,
    arrival_window: Duration,
    resubscribe_delay: Duration,
) {
    loop {
        match source.subscribe().await {
            Ok(mut events) => {
                info!(source = source.source_name(), "Insert stream subscribed");
                while let Some(event) = events.recv().await {
                    apply_event(event, &snapshots, &arrivals, arrival_window);
                }
                warn!("Insert stream closed; resubscribing");
            }
            Err(e) => {
                warn!(error = %e, "Subscribe failed; retrying");
            }
        }
        tokio::time::sleep(resubscribe_delay).await;
    }
}

fn apply_event(
    event: ListingEvent,
    snapshots: &SnapshotStore,
    arrivals: &Mutex<Vec<(ListingId, Instant)>>,
    arrival_window: Duration,
) {
    match event {
        ListingEvent::Inserted(raw) => {
            let Some(listing) = raw.normalize() else {
                warn!("Dropping malformed insert event");
                return;
            };
            if listing.status() != ListingStatus::Active {
                debug!(id = %listing.id(), "Ignoring non-active insert");
                return;
            }

            let now = Instant::now();
            {
                let mut arrivals = arrivals.lock();
                arrivals.retain(|(_, at)| now.duration_since(*at) < arrival_window);
                arrivals.push((listing.id().clone(), now));
            }

            debug!(id = %listing.id(), location = %listing.location_name(), "Listing inserted");
            snapshots.prepend(listing);
        }
    }
}
