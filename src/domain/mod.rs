//! Datastore-agnostic domain logic: the listing model, the snapshot
//! working set, and the pure analysis functions over it.

mod filter;
mod geo;
mod ids;
mod listing;
mod regions;
mod render;
mod search;
mod snapshot;
mod stats;
mod suggest;
mod trust;

// Core domain types
pub use ids::{ListingId, OwnerId};
pub use listing::{
    Currency, Listing, ListingEdit, ListingStatus, LocationAccuracy, OwnerProfile, RawId,
    RawListing, RawPrice, RawTags, TransactionType, VerificationTier, VoteTally,
};

// Geometry
pub use geo::{Boundary, GeoBounds, GeoPoint};

// Snapshot types and store
pub use snapshot::{ListingSnapshot, SnapshotStore};

// Region lookup
pub use regions::{contains_ci, region_for_location, OTHER_REGION, REGIONS};

// Analysis
pub use filter::{filter, ListingFilter, TransactionFilter};
pub use render::{
    display_price, heatmap_weight, point_features, FeatureProperties, PointFeature,
    PointFeatureCollection, PointGeometry,
};
pub use search::{
    classify, digital_address_point, has_local_listings, SearchIntent, CITY_CENTER,
    MAX_JITTER_DEG,
};
pub use stats::{aggregate, MarketStats, ZoneStat};
pub use suggest::{suggest, Suggestion, SuggestionKind, MIN_INPUT_LEN};
pub use trust::{score, Grade, TrustBreakdown, TrustScoreResult};
