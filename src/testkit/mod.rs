//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - [`ScriptedSource`](source::ScriptedSource): a mock
//!   [`ListingSource`](crate::adapter::ListingSource) with scripted load
//!   results and an external handle for delivering insert events.
//! - [`geocode`] - [`StaticGeocoder`](geocode::StaticGeocoder): canned
//!   geocode features with call counting and optional latency.
//! - [`domain`] - builders for raw and typed listings.

pub mod domain;
pub mod geocode;
pub mod source;
