//! Incremental search suggestions.
//!
//! Proposes up to three location completions and up to three feature
//! completions from the current snapshot as the user types. Below the
//! activation length nothing is computed at all.

use serde::Serialize;

use super::regions::contains_ci;
use super::snapshot::ListingSnapshot;

/// Minimum input length before suggestions activate.
pub const MIN_INPUT_LEN: usize = 2;

/// Per-kind suggestion cap.
const MAX_PER_KIND: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Location,
    Feature,
}

/// A proposed completion for a partial query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub value: String,
}

impl Suggestion {
    fn location(value: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Location,
            value: value.into(),
        }
    }

    fn feature(value: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Feature,
            value: value.into(),
        }
    }
}

/// Propose completions for a partial input: distinct matching location
/// names first (snapshot order), then distinct matching feature tags,
/// at most three of each.
#[must_use]
pub fn suggest(partial: &str, snapshot: &ListingSnapshot) -> Vec<Suggestion> {
    let partial = partial.trim();
    if partial.len() < MIN_INPUT_LEN {
        return Vec::new();
    }

    let mut suggestions = Vec::new();

    let mut seen_locations: Vec<&str> = Vec::new();
    for listing in snapshot.iter() {
        if suggestions.len() >= MAX_PER_KIND {
            break;
        }
        let name = listing.location_name();
        if name.is_empty() || seen_locations.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            continue;
        }
        seen_locations.push(name);
        if contains_ci(name, partial) {
            suggestions.push(Suggestion::location(name));
        }
    }

    let mut seen_features: Vec<&str> = Vec::new();
    let mut feature_count = 0;
    'outer: for listing in snapshot.iter() {
        for tag in listing.features() {
            if feature_count >= MAX_PER_KIND {
                break 'outer;
            }
            if seen_features.iter().any(|s| s.eq_ignore_ascii_case(tag)) {
                continue;
            }
            seen_features.push(tag);
            if contains_ci(tag, partial) {
                suggestions.push(Suggestion::feature(tag.clone()));
                feature_count += 1;
            }
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ListingId;
    use crate::domain::listing::{Listing, TransactionType};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn listing(id: &str, location: &str, features: &[&str]) -> Arc<Listing> {
        Arc::new(
            Listing::new(
                ListingId::from(id),
                format!("Listing {id}"),
                dec!(1000),
                TransactionType::Rent,
                location,
            )
            .with_features(features.iter().map(|s| s.to_string()).collect()),
        )
    }

    fn snapshot(listings: Vec<Arc<Listing>>) -> ListingSnapshot {
        ListingSnapshot::from_listings(listings)
    }

    #[test]
    fn short_input_returns_nothing() {
        let snap = snapshot(vec![listing("1", "Osu", &["Pool"])]);
        assert!(suggest("", &snap).is_empty());
        assert!(suggest("a", &snap).is_empty());
        assert!(suggest(" o ", &snap).is_empty());
    }

    #[test]
    fn feature_tag_matches_without_location_match() {
        let snap = snapshot(vec![listing("1", "Spintex", &["Pool", "Gym"])]);

        let results = suggest("pool", &snap);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, SuggestionKind::Feature);
        assert_eq!(results[0].value, "Pool");
    }

    #[test]
    fn locations_come_first_and_deduplicate() {
        let snap = snapshot(vec![
            listing("1", "East Legon", &["Garden"]),
            listing("2", "East Legon", &[]),
            listing("3", "East Legon Hills", &[]),
        ]);

        let results = suggest("legon", &snap);
        let values: Vec<&str> = results.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["East Legon", "East Legon Hills"]);
        assert!(results.iter().all(|s| s.kind == SuggestionKind::Location));
    }

    #[test]
    fn caps_at_three_per_kind() {
        let snap = snapshot(vec![
            listing("1", "Legon East", &["garden view"]),
            listing("2", "Legon West", &["garden patio"]),
            listing("3", "Legon North", &["garden shed"]),
            listing("4", "Legon South", &["garden wall"]),
        ]);

        let results = suggest("garden", &snap);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|s| s.kind == SuggestionKind::Feature));

        let locations = suggest("legon", &snap);
        assert_eq!(locations.len(), 3);
    }

    #[test]
    fn combined_cap_is_six() {
        let snap = snapshot(vec![
            listing("1", "Legon East", &["legon pool"]),
            listing("2", "Legon West", &["legon gym"]),
            listing("3", "Legon North", &["legon garden"]),
            listing("4", "Legon South", &["legon patio"]),
        ]);

        let results = suggest("legon", &snap);
        assert_eq!(results.len(), 6);
        assert_eq!(results[0].kind, SuggestionKind::Location);
        assert_eq!(results[3].kind, SuggestionKind::Feature);
    }

    #[test]
    fn first_occurrence_order_preserved() {
        let snap = snapshot(vec![
            listing("1", "Osu", &[]),
            listing("2", "Osu Ako-Adjei", &[]),
        ]);

        let results = suggest("osu", &snap);
        assert_eq!(results[0].value, "Osu");
        assert_eq!(results[1].value, "Osu Ako-Adjei");
    }
}
