//! Geocoding collaborator port and HTTP implementation.
//!
//! Requests are restricted to the operating country; only the first
//! returned feature is ever consumed by the resolver. Failures are
//! surfaced as [`GeocodeError`] and absorbed at the resolver boundary.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{GeoBounds, GeoPoint};
use crate::error::{GeocodeError, Result};

/// One resolved feature from the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeFeature {
    /// Human-readable label, e.g. `"Prampram, Ghana"`.
    pub label: String,
    pub center: GeoPoint,
    /// Viewport bounding box, when the feature has an areal extent.
    pub viewport: Option<GeoBounds>,
}

/// External geocoding service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode free text, restricted to the given ISO country code.
    /// Returns features in relevance order; may be empty.
    async fn geocode(&self, query: &str, country: &str) -> Result<Vec<GeocodeFeature>>;
}

/// HTTP client for a Google-geocode style endpoint.
pub struct HttpGeocoder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpGeocoder {
    #[must_use]
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    #[must_use]
    pub fn from_config(config: &crate::config::GeocodeConfig) -> Self {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, query: &str, country: &str) -> Result<Vec<GeocodeFeature>> {
        let url = format!("{}/geocode/json", self.base_url);

        debug!(query = %query, country = %country, "Geocoding");

        let response: GeocodeResponse = self
            .client
            .get(&url)
            .query(&[
                ("address", query),
                ("components", &format!("country:{country}")),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(GeocodeError::Request)?
            .json()
            .await
            .map_err(GeocodeError::Request)?;

        let features = response
            .results
            .into_iter()
            .map(GeocodeFeature::from)
            .collect();

        Ok(features)
    }
}

// Wire DTOs, kept out of the domain.

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
    viewport: Option<Viewport>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    northeast: LatLng,
    southwest: LatLng,
}

impl From<GeocodeResult> for GeocodeFeature {
    fn from(result: GeocodeResult) -> Self {
        let center = GeoPoint::new(result.geometry.location.lat, result.geometry.location.lng);
        let viewport = result.geometry.viewport.map(|v| {
            GeoBounds::new(
                GeoPoint::new(v.southwest.lat, v.southwest.lng),
                GeoPoint::new(v.northeast.lat, v.northeast.lng),
            )
        });
        Self {
            label: result.formatted_address,
            center,
            viewport,
        }
    }
}
