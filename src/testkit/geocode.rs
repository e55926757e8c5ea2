//! Mock [`Geocoder`] returning canned features.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::adapter::{GeocodeFeature, Geocoder};
use crate::domain::{GeoBounds, GeoPoint};
use crate::error::{GeocodeError, Result};

/// A mock geocoder with a fixed response and a call counter.
pub struct StaticGeocoder {
    features: Vec<GeocodeFeature>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicU32,
}

impl StaticGeocoder {
    /// A geocoder that returns the given features for every query.
    pub fn returning(features: Vec<GeocodeFeature>) -> Self {
        Self {
            features,
            fail: false,
            delay: None,
            calls: AtomicU32::new(0),
        }
    }

    /// A geocoder that finds nothing.
    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    /// A geocoder whose every request errors.
    pub fn failing() -> Self {
        Self {
            features: Vec::new(),
            fail: true,
            delay: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Delay each response, for exercising overlapping lookups.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of geocode requests received.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, _query: &str, _country: &str) -> Result<Vec<GeocodeFeature>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(GeocodeError::Malformed("scripted failure".into()).into());
        }
        Ok(self.features.clone())
    }
}

/// A feature at the given point with no viewport.
pub fn point_feature(label: &str, lat: f64, lng: f64) -> GeocodeFeature {
    GeocodeFeature {
        label: label.to_owned(),
        center: GeoPoint::new(lat, lng),
        viewport: None,
    }
}

/// A feature carrying a viewport around its center.
pub fn bounded_feature(label: &str, lat: f64, lng: f64, span: f64) -> GeocodeFeature {
    GeocodeFeature {
        label: label.to_owned(),
        center: GeoPoint::new(lat, lng),
        viewport: Some(GeoBounds::new(
            GeoPoint::new(lat - span, lng - span),
            GeoPoint::new(lat + span, lng + span),
        )),
    }
}
