//! Tiered search resolution.
//!
//! Resolution order, first match wins: digital-address code, exact
//! listing-location match, external geocode fallback. Geocode failures
//! are absorbed here and reported as `NoMatch`; they never propagate.
//! `resolve_latest` adds last-query-wins semantics for type-ahead use.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapter::Geocoder;
use crate::domain::{
    classify, digital_address_point, has_local_listings, Boundary, GeoPoint, Listing,
    ListingSnapshot, SearchIntent,
};

/// The outcome of resolving one search query.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A bare point target (digital-address placeholder, or a geocoded
    /// feature without areal extent).
    Target { point: GeoPoint },
    /// The query named a listing's location exactly.
    LocationMatch { listing: Arc<Listing> },
    /// A geocoded region with a boundary for the map to fence.
    Region {
        boundary: Boundary,
        /// False when no current listing mentions the query, so the UI
        /// can offer a waitlist instead of an empty map.
        has_local_listings: bool,
    },
    NoMatch,
}

/// Resolves free-text queries against the snapshot and the geocoding
/// collaborator.
pub struct SearchResolver {
    geocoder: Arc<dyn Geocoder>,
    country: String,
    generation: AtomicU64,
}

impl SearchResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>, country: impl Into<String>) -> Self {
        Self {
            geocoder,
            country: country.into(),
            generation: AtomicU64::new(0),
        }
    }

    /// Resolve a query. Idempotent per identical query + snapshot.
    pub async fn resolve(&self, query: &str, snapshot: &ListingSnapshot) -> SearchOutcome {
        match classify(query, snapshot) {
            SearchIntent::Empty => SearchOutcome::NoMatch,
            SearchIntent::DigitalAddress => {
                debug!(query = %query, "Digital-address code; skipping geocode");
                SearchOutcome::Target {
                    point: digital_address_point(),
                }
            }
            SearchIntent::ExactLocation(listing) => SearchOutcome::LocationMatch { listing },
            SearchIntent::FreeText => self.resolve_geocode(query, snapshot).await,
        }
    }

    /// Resolve with last-query-wins semantics: if a newer call starts
    /// while this one is in flight, the stale outcome is discarded and
    /// `None` is returned.
    pub async fn resolve_latest(
        &self,
        query: &str,
        snapshot: &ListingSnapshot,
    ) -> Option<SearchOutcome> {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.resolve(query, snapshot).await;
        if self.generation.load(Ordering::SeqCst) != issued {
            debug!(query = %query, "Discarding superseded search result");
            return None;
        }
        Some(outcome)
    }

    async fn resolve_geocode(&self, query: &str, snapshot: &ListingSnapshot) -> SearchOutcome {
        let features = match self.geocoder.geocode(query, &self.country).await {
            Ok(features) => features,
            Err(e) => {
                warn!(query = %query, error = %e, "Geocode failed");
                return SearchOutcome::NoMatch;
            }
        };

        // Only the first feature is used.
        let Some(feature) = features.into_iter().next() else {
            return SearchOutcome::NoMatch;
        };

        let boundary = match feature.viewport {
            Some(viewport) => Boundary::from_bounds(viewport),
            None => Boundary::circle(feature.center),
        };

        let has_local = has_local_listings(query, snapshot);
        if !has_local {
            debug!(query = %query, label = %feature.label, "No local listings here yet");
        }

        SearchOutcome::Region {
            boundary,
            has_local_listings: has_local,
        }
    }
}
