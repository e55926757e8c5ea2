//! Static neighborhood → region lookup.
//!
//! The table is hand-authored and intentionally incomplete; anything the
//! table and the substring fallback both miss lands in the `"Other"`
//! bucket. This is a known approximation, not a bug.

/// Administrative regions recognized by the aggregator.
pub const REGIONS: &[&str] = &[
    "Greater Accra",
    "Ashanti",
    "Western",
    "Central",
    "Eastern",
    "Volta",
    "Northern",
    "Upper East",
    "Upper West",
    "Bono",
    "Bono East",
    "Ahafo",
    "Oti",
    "Savannah",
    "North East",
    "Western North",
];

/// Fallback region when no mapping applies.
pub const OTHER_REGION: &str = "Other";

/// Known neighborhood names mapped to their region.
const NEIGHBORHOOD_MAP: &[(&str, &str)] = &[
    ("Cantonments", "Greater Accra"),
    ("Airport Residential", "Greater Accra"),
    ("Labone", "Greater Accra"),
    ("Osu", "Greater Accra"),
    ("East Legon", "Greater Accra"),
    ("Spintex", "Greater Accra"),
    ("Dzorwulu", "Greater Accra"),
    ("Abelemkpe", "Greater Accra"),
    ("Roman Ridge", "Greater Accra"),
    ("Ridge", "Greater Accra"),
    ("Tesano", "Greater Accra"),
    ("Achimota", "Greater Accra"),
    ("Tema", "Greater Accra"),
    ("Madina", "Greater Accra"),
    ("Adenta", "Greater Accra"),
    ("Lapaz", "Greater Accra"),
    ("Weija", "Greater Accra"),
    ("McCarthy Hill", "Greater Accra"),
    ("Kasoa", "Central"),
    ("Kumasi", "Ashanti"),
    ("Ahodwo", "Ashanti"),
    ("Takoradi", "Western"),
    ("Tarkwa", "Western"),
];

/// Case-insensitive substring containment, the one fuzzy-match primitive
/// shared by region mapping, search, and filtering.
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Map a free-form location string to a region name.
///
/// Exact neighborhood match first, then substring fallback against known
/// neighborhood and region names, then [`OTHER_REGION`].
#[must_use]
pub fn region_for_location(location: &str) -> &'static str {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return OTHER_REGION;
    }

    for (neighborhood, region) in NEIGHBORHOOD_MAP {
        if neighborhood.eq_ignore_ascii_case(trimmed) {
            return region;
        }
    }

    for (neighborhood, region) in NEIGHBORHOOD_MAP {
        if contains_ci(trimmed, neighborhood) {
            return region;
        }
    }

    for region in REGIONS {
        if contains_ci(trimmed, region) {
            return region;
        }
    }

    OTHER_REGION
}
