//! Render-consumption surface for the map collaborator.
//!
//! The core's responsibility ends at a point-feature collection with a
//! precomputed display price, plus the cluster/heatmap parameters the
//! renderer needs. No pixel work happens here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::sync::Arc;

use crate::config::RenderConfig;

use super::listing::Listing;

/// A GeoJSON-shaped point feature carrying the listing's attributes.
#[derive(Debug, Clone, Serialize)]
pub struct PointFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: FeatureProperties,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureProperties {
    #[serde(flatten)]
    pub listing: Arc<Listing>,
    /// Compact display price, e.g. `"6k"`.
    pub price_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[lng, lat]`, GeoJSON axis order.
    pub coordinates: [f64; 2],
}

/// The collection handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct PointFeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<PointFeature>,
}

/// Build the render collection from an already-filtered listing set.
/// Listings without a coordinate are skipped; they cannot be pinned.
#[must_use]
pub fn point_features(listings: &[Arc<Listing>]) -> PointFeatureCollection {
    let features = listings
        .iter()
        .filter_map(|listing| {
            let point = listing.coordinate()?;
            Some(PointFeature {
                kind: "Feature",
                properties: FeatureProperties {
                    listing: listing.clone(),
                    price_display: display_price(listing.price()),
                },
                geometry: PointGeometry {
                    kind: "Point",
                    coordinates: [point.lng, point.lat],
                },
            })
        })
        .collect();

    PointFeatureCollection {
        kind: "FeatureCollection",
        features,
    }
}

/// Compact price label for map pins: thousands rounded with a `k` suffix,
/// smaller amounts verbatim.
#[must_use]
pub fn display_price(price: Decimal) -> String {
    if price >= Decimal::from(1000) {
        let thousands = (price / Decimal::from(1000))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{thousands}k")
    } else {
        format!("{}", price.round())
    }
}

/// Heatmap weight for one listing: linear in price, saturating at the
/// configured ceiling.
#[must_use]
pub fn heatmap_weight(price: Decimal, config: &RenderConfig) -> f64 {
    if config.heatmap_price_ceiling <= Decimal::ZERO {
        return 0.0;
    }
    let ratio = (price / config.heatmap_price_ceiling)
        .to_f64()
        .unwrap_or(0.0);
    ratio.clamp(0.0, 1.0)
}
