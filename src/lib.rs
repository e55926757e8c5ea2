//! landsight - Market intelligence for a live property-listing platform.
//!
//! This crate maintains a client session's working set of listings and
//! answers the questions the platform's UI asks of it: search, spatial
//! filtering, market statistics, and per-listing trust scoring.
//!
//! # Architecture
//!
//! The listing snapshot is the single source of truth; everything else
//! is a pure function (or a thin stateful wrapper) over it:
//!
//! - **[`store`]** - `LiveListingStore`: bulk load plus a single
//!   subscriber task applying insert events in arrival order
//! - **[`resolver`]** - `SearchResolver`: tiered query resolution
//!   (digital-address code, exact location, geocode fallback) with
//!   last-query-wins semantics
//! - **[`domain`]** - the listing model and the pure analysis layer:
//!   suggestions, spatial filtering, statistics, trust scoring
//! - **[`adapter`]** - ports to the external collaborators (datastore,
//!   geocoder) and their HTTP implementations
//! - **[`config`]** - TOML configuration with render parameters for the
//!   map collaborator
//! - **[`app`]** - `MarketIntel` facade composing the above with
//!   injected collaborators
//!
//! # Example
//!
//! ```no_run
//! use landsight::domain::{suggest, ListingSnapshot};
//!
//! let snapshot = ListingSnapshot::default();
//! let completions = suggest("east", &snapshot);
//! assert!(completions.is_empty());
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod resolver;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
