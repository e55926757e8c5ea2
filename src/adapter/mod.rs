//! Ports to the external collaborators (datastore, geocoder) and their
//! concrete implementations.

mod datastore;
mod geocode;

pub use datastore::{ListingEvent, ListingSource};
pub use geocode::{GeocodeFeature, Geocoder, HttpGeocoder};
