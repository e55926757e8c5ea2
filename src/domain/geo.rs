//! Geodetic primitives: points, bounding boxes, and search boundaries.
//!
//! Coordinates are plain `f64` degrees (WGS84). Containment uses the
//! standard even-odd ray-casting test; edge points follow the half-open
//! rule of the crossing test, which is consistent for all inputs.

use serde::{Deserialize, Serialize};

/// Approximate kilometres per degree of latitude.
const KM_PER_DEGREE_LAT: f64 = 111.32;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned bounding box (geocoder viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub southwest: GeoPoint,
    pub northeast: GeoPoint,
}

impl GeoBounds {
    #[must_use]
    pub const fn new(southwest: GeoPoint, northeast: GeoPoint) -> Self {
        Self { southwest, northeast }
    }

    /// Check whether a point lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.southwest.lat
            && point.lat <= self.northeast.lat
            && point.lng >= self.southwest.lng
            && point.lng <= self.northeast.lng
    }
}

/// The spatial extent of a resolved search target, as a closed polygon ring.
///
/// Built either from a geocoder bounding box or synthesized as a
/// fixed-vertex circle when the geocoder supplies only a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    ring: Vec<GeoPoint>,
}

impl Boundary {
    /// Number of vertices used when synthesizing a circular boundary.
    pub const CIRCLE_VERTICES: usize = 10;

    /// Radius in kilometres of a synthesized circular boundary.
    pub const CIRCLE_RADIUS_KM: f64 = 1.5;

    /// Build a boundary from an explicit ring of vertices.
    ///
    /// Returns `None` for degenerate rings (fewer than 3 vertices).
    #[must_use]
    pub fn from_ring(ring: Vec<GeoPoint>) -> Option<Self> {
        if ring.len() < 3 {
            return None;
        }
        Some(Self { ring })
    }

    /// Build a rectangular boundary from a bounding box.
    #[must_use]
    pub fn from_bounds(bounds: GeoBounds) -> Self {
        let sw = bounds.southwest;
        let ne = bounds.northeast;
        Self {
            ring: vec![
                GeoPoint::new(sw.lat, sw.lng),
                GeoPoint::new(sw.lat, ne.lng),
                GeoPoint::new(ne.lat, ne.lng),
                GeoPoint::new(ne.lat, sw.lng),
            ],
        }
    }

    /// Synthesize a fixed-vertex circle around a center point.
    ///
    /// Used when the geocoder returns a point without a viewport. The
    /// radius is [`Self::CIRCLE_RADIUS_KM`]; longitude deltas are scaled
    /// by the cosine of the center latitude.
    #[must_use]
    pub fn circle(center: GeoPoint) -> Self {
        let dlat = Self::CIRCLE_RADIUS_KM / KM_PER_DEGREE_LAT;
        let dlng = dlat / center.lat.to_radians().cos().max(f64::EPSILON);

        let ring = (0..Self::CIRCLE_VERTICES)
            .map(|i| {
                let theta = (i as f64) * std::f64::consts::TAU / (Self::CIRCLE_VERTICES as f64);
                GeoPoint::new(
                    center.lat + dlat * theta.sin(),
                    center.lng + dlng * theta.cos(),
                )
            })
            .collect();

        Self { ring }
    }

    /// The polygon vertices, in order. The ring is implicitly closed.
    #[must_use]
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Even-odd ray-casting containment test.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        let mut inside = false;
        let n = self.ring.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[j];
            let crosses = (a.lat > point.lat) != (b.lat > point.lat)
                && point.lng
                    < (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
