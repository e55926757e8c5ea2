//! Spatial and attribute filtering of the listing set.
//!
//! A filter is the conjunction of independent predicates: transaction
//! type, free-text containment, polygon containment, plus an optional
//! price band and an accuracy toggle. Every predicate defaults to
//! pass-through.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::geo::Boundary;
use super::listing::{Listing, LocationAccuracy, TransactionType};
use super::regions::contains_ci;
use super::snapshot::ListingSnapshot;

/// Transaction-type predicate. `All` always passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    #[default]
    All,
    Only(TransactionType),
}

/// The filter parameters supplied by the map UI.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub transaction: TransactionFilter,
    /// Case-insensitive substring over title, location, features, and
    /// description. Empty text always passes.
    pub text: String,
    /// Active user-drawn region, if any. Listings without a coordinate
    /// never pass an active polygon.
    pub polygon: Option<Boundary>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Restrict to listings with on-site pinned coordinates.
    pub high_accuracy_only: bool,
}

impl ListingFilter {
    /// True when the listing passes every active predicate.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_transaction(listing)
            && self.matches_text(listing)
            && self.matches_polygon(listing)
            && self.matches_price(listing)
            && self.matches_accuracy(listing)
    }

    fn matches_transaction(&self, listing: &Listing) -> bool {
        match self.transaction {
            TransactionFilter::All => true,
            TransactionFilter::Only(t) => listing.transaction() == t,
        }
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        let needle = self.text.trim();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {} {}",
            listing.title(),
            listing.location_name(),
            listing.features().join(" "),
            listing.description()
        );
        contains_ci(&haystack, needle)
    }

    fn matches_polygon(&self, listing: &Listing) -> bool {
        match &self.polygon {
            None => true,
            Some(polygon) => match listing.coordinate() {
                Some(point) => polygon.contains(point),
                None => false,
            },
        }
    }

    fn matches_price(&self, listing: &Listing) -> bool {
        if let Some(min) = self.min_price {
            if listing.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price() > max {
                return false;
            }
        }
        true
    }

    fn matches_accuracy(&self, listing: &Listing) -> bool {
        !self.high_accuracy_only || listing.accuracy() == LocationAccuracy::High
    }
}

/// Apply the filter to a snapshot, preserving order.
#[must_use]
pub fn filter(snapshot: &ListingSnapshot, filter: &ListingFilter) -> Vec<Arc<Listing>> {
    snapshot
        .iter()
        .filter(|l| filter.matches(l))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::GeoPoint;
    use crate::domain::ids::ListingId;
    use rust_decimal_macros::dec;

    fn listing(id: &str, t: TransactionType) -> Listing {
        Listing::new(
            ListingId::from(id),
            "2 Bed Apartment",
            dec!(4000),
            t,
            "Spintex",
        )
        .with_features(vec!["Pool".into(), "Gym".into()])
        .with_description("quiet compound near the mall")
    }

    fn snap_of(listings: Vec<Listing>) -> ListingSnapshot {
        ListingSnapshot::from_listings(listings.into_iter().map(Arc::new).collect())
    }

    #[test]
    fn default_filter_passes_everything() {
        let snap = snap_of(vec![
            listing("1", TransactionType::Rent),
            listing("2", TransactionType::Sale),
        ]);
        assert_eq!(filter(&snap, &ListingFilter::default()).len(), 2);
    }

    #[test]
    fn transaction_filter_restricts() {
        let snap = snap_of(vec![
            listing("1", TransactionType::Rent),
            listing("2", TransactionType::Sale),
        ]);
        let f = ListingFilter {
            transaction: TransactionFilter::Only(TransactionType::Rent),
            ..ListingFilter::default()
        };
        let out = filter(&snap, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id().as_str(), "1");
    }

    #[test]
    fn text_matches_any_field() {
        let snap = snap_of(vec![listing("1", TransactionType::Rent)]);

        for needle in ["apartment", "SPINTEX", "gym", "compound"] {
            let f = ListingFilter {
                text: needle.into(),
                ..ListingFilter::default()
            };
            assert_eq!(filter(&snap, &f).len(), 1, "needle: {needle}");
        }

        let miss = ListingFilter {
            text: "penthouse".into(),
            ..ListingFilter::default()
        };
        assert!(filter(&snap, &miss).is_empty());
    }

    #[test]
    fn polygon_excludes_coordinateless_listings() {
        let inside = listing("1", TransactionType::Rent).with_coordinate(GeoPoint::new(0.5, 0.5));
        let outside = listing("2", TransactionType::Rent).with_coordinate(GeoPoint::new(2.0, 2.0));
        let no_coord = listing("3", TransactionType::Rent);
        let snap = snap_of(vec![inside, outside, no_coord]);

        let square = Boundary::from_ring(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ])
        .unwrap();
        let f = ListingFilter {
            polygon: Some(square),
            ..ListingFilter::default()
        };

        let out = filter(&snap, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id().as_str(), "1");
    }

    #[test]
    fn price_band_is_inclusive() {
        let snap = snap_of(vec![listing("1", TransactionType::Rent)]);

        let exact = ListingFilter {
            min_price: Some(dec!(4000)),
            max_price: Some(dec!(4000)),
            ..ListingFilter::default()
        };
        assert_eq!(filter(&snap, &exact).len(), 1);

        let below = ListingFilter {
            min_price: Some(dec!(4001)),
            ..ListingFilter::default()
        };
        assert!(filter(&snap, &below).is_empty());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let snap = snap_of(vec![
            listing("1", TransactionType::Rent).with_coordinate(GeoPoint::new(0.5, 0.5))
        ]);

        let f = ListingFilter {
            transaction: TransactionFilter::Only(TransactionType::Rent),
            text: "pool".into(),
            polygon: Boundary::from_ring(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, 0.0),
            ]),
            ..ListingFilter::default()
        };
        assert_eq!(filter(&snap, &f).len(), 1);

        // Same filter with one failing predicate rejects the listing.
        let f = ListingFilter {
            text: "helipad".into(),
            ..f
        };
        assert!(filter(&snap, &f).is_empty());
    }

    #[test]
    fn accuracy_toggle() {
        let pinned =
            listing("1", TransactionType::Rent).with_accuracy(LocationAccuracy::High);
        let rough = listing("2", TransactionType::Rent);
        let snap = snap_of(vec![pinned, rough]);

        let f = ListingFilter {
            high_accuracy_only: true,
            ..ListingFilter::default()
        };
        let out = filter(&snap, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id().as_str(), "1");
    }
}
