//! Listing datastore port.
//!
//! The authoritative datastore lives outside this core. The port covers
//! exactly the two operations the live store needs: a one-time bulk load
//! and an insert-event subscription. Implementations deliver events in
//! arrival order over an mpsc channel; a closed channel signals a dropped
//! subscription and the store resubscribes.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::RawListing;
use crate::error::Result;

/// A change event delivered by the datastore subscription.
#[derive(Debug, Clone)]
pub enum ListingEvent {
    /// A new listing row was inserted.
    Inserted(RawListing),
}

/// Access to the external listing datastore.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Bulk-fetch the current listing set, ordered by creation time
    /// descending (newest first).
    async fn load(&self) -> Result<Vec<RawListing>>;

    /// Open an insert-event subscription. Events arrive in insertion
    /// order; the receiver closing means the subscription dropped.
    async fn subscribe(&self) -> Result<mpsc::Receiver<ListingEvent>>;

    /// Source name for logging/debugging.
    fn source_name(&self) -> &'static str;
}
