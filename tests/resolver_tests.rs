//! Integration tests for search resolution.
//!
//! Covers the tier ordering, the digital-address fast path, boundary
//! synthesis from geocode results, and last-query-wins discarding.

mod support;

use std::sync::Arc;
use std::time::Duration;

use landsight::domain::{Boundary, GeoPoint, CITY_CENTER, MAX_JITTER_DEG};
use landsight::resolver::{SearchOutcome, SearchResolver};
use landsight::testkit::domain::listing;
use landsight::testkit::geocode::{bounded_feature, point_feature, StaticGeocoder};

use support::snapshot_of;

#[tokio::test]
async fn empty_query_resolves_without_geocoding() {
    let geocoder = Arc::new(StaticGeocoder::empty());
    let resolver = SearchResolver::new(geocoder.clone(), "GH");
    let snapshot = snapshot_of(vec![]);

    let outcome = resolver.resolve("   ", &snapshot).await;

    assert!(matches!(outcome, SearchOutcome::NoMatch));
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn digital_address_yields_jittered_point_and_never_geocodes() {
    let geocoder = Arc::new(StaticGeocoder::failing());
    let resolver = SearchResolver::new(geocoder.clone(), "GH");
    let snapshot = snapshot_of(vec![]);

    let outcome = resolver.resolve("GA-184-9283", &snapshot).await;

    let SearchOutcome::Target { point } = outcome else {
        panic!("expected a point target, got {outcome:?}");
    };
    assert!((point.lat - CITY_CENTER.lat).abs() <= MAX_JITTER_DEG);
    assert!((point.lng - CITY_CENTER.lng).abs() <= MAX_JITTER_DEG);
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn exact_location_match_outranks_geocoding() {
    let geocoder = Arc::new(StaticGeocoder::returning(vec![point_feature(
        "Osu, Accra, Ghana",
        5.55,
        -0.18,
    )]));
    let resolver = SearchResolver::new(geocoder.clone(), "GH");
    let snapshot = snapshot_of(vec![listing("a", "Two bedroom")]);

    let outcome = resolver.resolve("east legon, accra", &snapshot).await;

    let SearchOutcome::LocationMatch { listing } = outcome else {
        panic!("expected a location match, got {outcome:?}");
    };
    assert_eq!(listing.location_name(), "East Legon, Accra");
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn geocoded_viewport_becomes_rectangular_boundary() {
    let geocoder = Arc::new(StaticGeocoder::returning(vec![bounded_feature(
        "Prampram, Ghana",
        5.72,
        0.11,
        0.05,
    )]));
    let resolver = SearchResolver::new(geocoder, "GH");
    let snapshot = snapshot_of(vec![listing("a", "House near Prampram beach")]);

    let outcome = resolver.resolve("Prampram", &snapshot).await;

    let SearchOutcome::Region {
        boundary,
        has_local_listings,
    } = outcome
    else {
        panic!("expected a region, got {outcome:?}");
    };
    assert!(has_local_listings);
    assert_eq!(boundary.ring().len(), 4);
    assert!(boundary.contains(GeoPoint::new(5.72, 0.11)));
    assert!(!boundary.contains(GeoPoint::new(5.9, 0.11)));
}

#[tokio::test]
async fn geocoded_point_without_viewport_gets_circular_boundary() {
    let geocoder = Arc::new(StaticGeocoder::returning(vec![point_feature(
        "Aburi, Ghana",
        5.85,
        -0.17,
    )]));
    let resolver = SearchResolver::new(geocoder, "GH");
    let snapshot = snapshot_of(vec![]);

    let outcome = resolver.resolve("Aburi", &snapshot).await;

    let SearchOutcome::Region {
        boundary,
        has_local_listings,
    } = outcome
    else {
        panic!("expected a region, got {outcome:?}");
    };
    assert!(!has_local_listings);
    assert_eq!(boundary.ring().len(), Boundary::CIRCLE_VERTICES);
    assert!(boundary.contains(GeoPoint::new(5.85, -0.17)));
}

#[tokio::test]
async fn geocode_failure_is_absorbed_as_no_match() {
    let geocoder = Arc::new(StaticGeocoder::failing());
    let resolver = SearchResolver::new(geocoder, "GH");
    let snapshot = snapshot_of(vec![]);

    let outcome = resolver.resolve("Nowhere In Particular", &snapshot).await;

    assert!(matches!(outcome, SearchOutcome::NoMatch));
}

#[tokio::test]
async fn empty_geocode_result_is_no_match() {
    let geocoder = Arc::new(StaticGeocoder::empty());
    let resolver = SearchResolver::new(geocoder, "GH");
    let snapshot = snapshot_of(vec![]);

    let outcome = resolver.resolve("Xyzzy", &snapshot).await;

    assert!(matches!(outcome, SearchOutcome::NoMatch));
}

#[tokio::test(start_paused = true)]
async fn superseded_search_is_discarded() {
    let geocoder = Arc::new(
        StaticGeocoder::returning(vec![point_feature("Tema, Ghana", 5.67, -0.01)])
            .with_delay(Duration::from_millis(200)),
    );
    let resolver = Arc::new(SearchResolver::new(geocoder, "GH"));
    let snapshot = snapshot_of(vec![]);

    let slow = {
        let resolver = resolver.clone();
        let snapshot = snapshot_of(vec![]);
        tokio::spawn(async move { resolver.resolve_latest("Tema", &snapshot).await })
    };
    // Let the first lookup start before issuing the replacement.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fresh = resolver.resolve_latest("Tema Community 1", &snapshot).await;

    assert!(slow.await.unwrap().is_none());
    assert!(fresh.is_some());
}
