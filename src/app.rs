//! Application facade.
//!
//! Wires the live store, the resolver, and the pure analysis functions
//! behind one handle. Both external collaborators are injected through
//! their ports; there is no hidden global client.

use std::sync::Arc;

use crate::adapter::{Geocoder, ListingSource};
use crate::config::Config;
use crate::domain::{
    self, ListingFilter, ListingSnapshot, MarketStats, OwnerProfile, PointFeatureCollection,
    Suggestion, TrustScoreResult,
};
use crate::resolver::{SearchOutcome, SearchResolver};
use crate::store::LiveListingStore;

/// The market-intelligence engine for one client session.
pub struct MarketIntel {
    store: LiveListingStore,
    resolver: SearchResolver,
    config: Config,
}

impl MarketIntel {
    /// Start the engine: bulk-load the working set and begin consuming
    /// insert events.
    pub async fn start(
        source: Arc<dyn ListingSource>,
        geocoder: Arc<dyn Geocoder>,
        config: Config,
    ) -> Self {
        let store = LiveListingStore::start(source, &config.store).await;
        let resolver = SearchResolver::new(geocoder, config.geocode.country.clone());
        Self {
            store,
            resolver,
            config,
        }
    }

    /// The live listing store.
    #[must_use]
    pub fn store(&self) -> &LiveListingStore {
        &self.store
    }

    /// Capture the current working set.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot {
        self.store.snapshot()
    }

    /// Resolve a search query against the current snapshot, discarding
    /// the result if a newer query supersedes it mid-flight.
    pub async fn search(&self, query: &str) -> Option<SearchOutcome> {
        let snapshot = self.snapshot();
        self.resolver.resolve_latest(query, &snapshot).await
    }

    /// Type-ahead suggestions for a partial query.
    #[must_use]
    pub fn suggest(&self, partial: &str) -> Vec<Suggestion> {
        domain::suggest(partial, &self.snapshot())
    }

    /// Filter the current snapshot and package it for the renderer.
    #[must_use]
    pub fn map_features(&self, filter: &ListingFilter) -> PointFeatureCollection {
        let listings = domain::filter(&self.snapshot(), filter);
        domain::point_features(&listings)
    }

    /// Region-scoped market statistics over the current snapshot.
    #[must_use]
    pub fn market_stats(&self, region: Option<&str>) -> MarketStats {
        domain::aggregate(&self.snapshot(), region)
    }

    /// Trust score for one listing in the current snapshot.
    #[must_use]
    pub fn trust_score(
        &self,
        listing: &crate::domain::Listing,
        owner: Option<&OwnerProfile>,
    ) -> TrustScoreResult {
        domain::score(listing, owner)
    }

    /// Cluster/heatmap parameters for the rendering collaborator.
    #[must_use]
    pub fn render_config(&self) -> &crate::config::RenderConfig {
        &self.config.render
    }
}
