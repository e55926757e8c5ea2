//! Region-scoped market statistics.
//!
//! Everything here is a pure function of the listing snapshot; there is
//! no caching and no external state. An empty restricted set yields a
//! zero-valued result, never a division by zero.

use rust_decimal::Decimal;
use serde::Serialize;

use super::listing::TransactionType;
use super::regions::{region_for_location, OTHER_REGION};
use super::snapshot::ListingSnapshot;

/// Zone leaderboard rows kept per aggregation.
const LEADERBOARD_SIZE: usize = 5;

/// One zone (location-name grouping) on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStat {
    pub name: String,
    pub count: usize,
    pub avg_price: Decimal,
    /// Listing volume normalized against the busiest zone, 0-100.
    pub demand_score: u8,
}

/// Descriptive statistics for a region (or the whole snapshot).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketStats {
    pub region: String,
    pub listing_count: usize,
    pub mean_price: Decimal,
    pub median_price: Decimal,
    pub rent_mean: Decimal,
    pub sale_mean: Decimal,
    pub zones: Vec<ZoneStat>,
}

impl MarketStats {
    fn empty(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }
}

/// Compute market statistics over the snapshot, optionally restricted to
/// one region via the static neighborhood lookup.
#[must_use]
pub fn aggregate(snapshot: &ListingSnapshot, region: Option<&str>) -> MarketStats {
    let region_label = region.unwrap_or("All");

    let restricted: Vec<_> = snapshot
        .iter()
        .filter(|l| match region {
            Some(r) => region_for_location(l.location_name()).eq_ignore_ascii_case(r),
            None => true,
        })
        .collect();

    if restricted.is_empty() {
        return MarketStats::empty(region_label);
    }

    let count = restricted.len();
    let total: Decimal = restricted.iter().map(|l| l.price()).sum();
    let mean_price = total / Decimal::from(count);

    let mut prices: Vec<Decimal> = restricted.iter().map(|l| l.price()).collect();
    prices.sort();
    let median_price = median_of_sorted(&prices);

    let rent_mean = partition_mean(&restricted, TransactionType::Rent);
    let sale_mean = partition_mean(&restricted, TransactionType::Sale);

    let zones = zone_leaderboard(&restricted);

    MarketStats {
        region: region_label.to_string(),
        listing_count: count,
        mean_price,
        median_price,
        rent_mean,
        sale_mean,
        zones,
    }
}

/// Middle element for odd counts, average of the two central elements for
/// even counts. Input must be sorted and non-empty.
fn median_of_sorted(prices: &[Decimal]) -> Decimal {
    let n = prices.len();
    if n % 2 == 1 {
        prices[n / 2]
    } else {
        (prices[n / 2 - 1] + prices[n / 2]) / Decimal::TWO
    }
}

/// Mean price of one transaction-type partition; zero when empty.
fn partition_mean(
    listings: &[&std::sync::Arc<super::listing::Listing>],
    transaction: TransactionType,
) -> Decimal {
    let partition: Vec<_> = listings
        .iter()
        .filter(|l| l.transaction() == transaction)
        .collect();
    if partition.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = partition.iter().map(|l| l.price()).sum();
    total / Decimal::from(partition.len())
}

/// Group by zone (the location-name segment before the first comma),
/// sort descending by count, keep the top rows, and derive a demand
/// score from each zone's share of the busiest zone's volume.
fn zone_leaderboard(listings: &[&std::sync::Arc<super::listing::Listing>]) -> Vec<ZoneStat> {
    let mut groups: Vec<(String, usize, Decimal)> = Vec::new();

    for listing in listings {
        let zone = zone_key(listing.location_name());
        match groups.iter_mut().find(|(name, _, _)| *name == zone) {
            Some((_, count, total)) => {
                *count += 1;
                *total += listing.price();
            }
            None => groups.push((zone, 1, listing.price())),
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(LEADERBOARD_SIZE);

    let max_count = groups.first().map_or(1, |(_, count, _)| *count).max(1);

    groups
        .into_iter()
        .map(|(name, count, total)| ZoneStat {
            name,
            count,
            avg_price: total / Decimal::from(count),
            demand_score: ((count * 100) / max_count).min(100) as u8,
        })
        .collect()
}

/// Normalize a location name to its zone key: the segment before the
/// first comma, trimmed. Empty names group under a placeholder.
fn zone_key(location_name: &str) -> String {
    let key = location_name
        .split(',')
        .next()
        .unwrap_or(location_name)
        .trim();
    if key.is_empty() {
        OTHER_REGION.to_string()
    } else {
        key.to_string()
    }
}
