//! Pure search-query analysis.
//!
//! Classifies raw query text into a resolution intent and provides the
//! snapshot-side matching primitives the resolver composes. Nothing in
//! this module performs I/O.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use std::sync::Arc;

use super::geo::GeoPoint;
use super::listing::Listing;
use super::regions::contains_ci;
use super::snapshot::ListingSnapshot;

lazy_static! {
    /// Postal/digital-address code: two letters, then two groups of 3-4
    /// digits, dash separated. Case-insensitive.
    static ref DIGITAL_ADDRESS: Regex =
        Regex::new(r"^[A-Za-z]{2}-\d{3,4}-\d{3,4}$").expect("digital address pattern");
}

/// City-center reference used for digital-address placeholder points
/// (Accra).
pub const CITY_CENTER: GeoPoint = GeoPoint::new(5.6037, -0.1870);

/// Maximum placeholder jitter per axis, in degrees.
pub const MAX_JITTER_DEG: f64 = 0.01;

/// Derived intent of a raw search query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    /// Empty or whitespace-only input.
    Empty,
    /// A digital-address code; resolved near the city center without
    /// any geocoding.
    DigitalAddress,
    /// Case-insensitive exact match on a listing's location name.
    ExactLocation(Arc<Listing>),
    /// Anything else: handed to the external geocoder.
    FreeText,
}

/// Classify a query against the current snapshot.
#[must_use]
pub fn classify(query: &str, snapshot: &ListingSnapshot) -> SearchIntent {
    let query = query.trim();
    if query.is_empty() {
        return SearchIntent::Empty;
    }

    if DIGITAL_ADDRESS.is_match(query) {
        return SearchIntent::DigitalAddress;
    }

    if let Some(listing) = snapshot
        .iter()
        .find(|l| l.location_name().eq_ignore_ascii_case(query))
    {
        return SearchIntent::ExactLocation(listing.clone());
    }

    SearchIntent::FreeText
}

/// Placeholder point for a digital-address code: the city-center
/// reference with small random jitter on each axis. Deliberately
/// low-fidelity; the code is a hint, not a lookup.
#[must_use]
pub fn digital_address_point() -> GeoPoint {
    let mut rng = rand::thread_rng();
    GeoPoint::new(
        CITY_CENTER.lat + rng.gen_range(-MAX_JITTER_DEG..=MAX_JITTER_DEG),
        CITY_CENTER.lng + rng.gen_range(-MAX_JITTER_DEG..=MAX_JITTER_DEG),
    )
}

/// Whether any current listing mentions the query in its location name
/// or title. Drives the "no local listings here yet" waitlist signal.
#[must_use]
pub fn has_local_listings(query: &str, snapshot: &ListingSnapshot) -> bool {
    snapshot.iter().any(|l| {
        contains_ci(l.location_name(), query) || contains_ci(l.title(), query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ListingId;
    use crate::domain::listing::TransactionType;
    use rust_decimal_macros::dec;

    fn listing(id: &str, location: &str, title: &str) -> Arc<Listing> {
        Arc::new(Listing::new(
            ListingId::from(id),
            title,
            dec!(1000),
            TransactionType::Rent,
            location,
        ))
    }

    fn snapshot(listings: Vec<Arc<Listing>>) -> ListingSnapshot {
        ListingSnapshot::from_listings(listings)
    }

    #[test]
    fn empty_query_classifies_empty() {
        let snap = snapshot(vec![]);
        assert_eq!(classify("", &snap), SearchIntent::Empty);
        assert_eq!(classify("   ", &snap), SearchIntent::Empty);
    }

    #[test]
    fn digital_address_codes_match() {
        let snap = snapshot(vec![]);
        for code in ["GA-184-9821", "ga-184-9821", "AK-1234-567", "CP-039-0193"] {
            assert_eq!(classify(code, &snap), SearchIntent::DigitalAddress, "{code}");
        }
    }

    #[test]
    fn near_miss_codes_fall_through() {
        let snap = snapshot(vec![]);
        for q in ["GA-18-9821", "GAA-184-9821", "GA-184-98", "GA 184 9821", "G1-184-9821"] {
            assert_eq!(classify(q, &snap), SearchIntent::FreeText, "{q}");
        }
    }

    #[test]
    fn exact_location_beats_free_text() {
        let l = listing("1", "East Legon", "Townhouse");
        let snap = snapshot(vec![l.clone()]);

        match classify("east legon", &snap) {
            SearchIntent::ExactLocation(found) => assert_eq!(found.id(), l.id()),
            other => panic!("expected exact match, got {other:?}"),
        }

        // Substring is not exact.
        assert_eq!(classify("east", &snap), SearchIntent::FreeText);
    }

    #[test]
    fn digital_address_beats_exact_location() {
        // A listing whose location name is itself a code.
        let snap = snapshot(vec![listing("1", "GA-184-9821", "Odd one")]);
        assert_eq!(classify("GA-184-9821", &snap), SearchIntent::DigitalAddress);
    }

    #[test]
    fn placeholder_point_stays_within_jitter_bounds() {
        for _ in 0..50 {
            let p = digital_address_point();
            assert!((p.lat - CITY_CENTER.lat).abs() <= MAX_JITTER_DEG);
            assert!((p.lng - CITY_CENTER.lng).abs() <= MAX_JITTER_DEG);
        }
    }

    #[test]
    fn local_listing_check_scans_location_and_title() {
        let snap = snapshot(vec![listing("1", "Prampram", "Beachfront plot")]);
        assert!(has_local_listings("prampram", &snap));
        assert!(has_local_listings("beachfront", &snap));
        assert!(!has_local_listings("kumasi", &snap));
    }
}
