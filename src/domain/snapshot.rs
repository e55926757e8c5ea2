//! Thread-safe listing snapshot store.
//!
//! The working set is an ordered sequence, newest insert first. Exactly
//! one writer (the live store's subscriber task) mutates it; every reader
//! takes a [`ListingSnapshot`], which is a cheap vector of `Arc` pointers
//! captured under the read lock, so readers never observe a partial
//! update.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

use super::ids::ListingId;
use super::listing::Listing;

/// An immutable, ordered view of the current listing set, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListingSnapshot {
    listings: Vec<Arc<Listing>>,
}

impl ListingSnapshot {
    /// Build a snapshot from listings already ordered newest-first.
    #[must_use]
    pub fn from_listings(listings: Vec<Arc<Listing>>) -> Self {
        Self { listings }
    }

    /// All listings, newest insert first.
    #[must_use]
    pub fn listings(&self) -> &[Arc<Listing>] {
        &self.listings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Iterate over the listings in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Listing>> {
        self.listings.iter()
    }

    /// Find a listing by id.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&Arc<Listing>> {
        self.listings.iter().find(|l| l.id() == id)
    }
}

/// Shared owner of the working set.
pub struct SnapshotStore {
    listings: RwLock<VecDeque<Arc<Listing>>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: RwLock::new(VecDeque::new()),
        }
    }

    /// Install the bulk-loaded set, replacing anything present.
    /// Input order is preserved and must already be newest-first.
    pub fn replace(&self, listings: Vec<Listing>) {
        let mut guard = self.listings.write();
        *guard = listings.into_iter().map(Arc::new).collect();
    }

    /// Prepend one newly inserted listing. O(1) amortized.
    ///
    /// A listing with an id already present replaces the stored copy
    /// in place instead (edits re-delivered by the stream).
    pub fn prepend(&self, listing: Listing) {
        let mut guard = self.listings.write();
        if let Some(existing) = guard.iter_mut().find(|l| l.id() == listing.id()) {
            *existing = Arc::new(listing);
        } else {
            guard.push_front(Arc::new(listing));
        }
    }

    /// Capture the current working set atomically.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot {
        let guard = self.listings.read();
        ListingSnapshot::from_listings(guard.iter().cloned().collect())
    }

    /// Number of listings currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
