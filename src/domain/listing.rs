//! Listing domain types and ingest normalization.
//!
//! - [`Listing`] - A strongly typed property record
//! - [`RawListing`] - The loosely typed record shape the datastore emits
//! - [`OwnerProfile`] - Verification data for the listing owner
//!
//! Source records are merged from several schema generations: price may
//! arrive as a number or a string with currency symbols, the feature list
//! as an array or a comma-joined string, and images from a column or a
//! relation. All of that is resolved in exactly one place,
//! [`RawListing::normalize`], so no fallback chains leak into the
//! components that read the store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::ids::{ListingId, OwnerId};

/// Transaction type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Rent,
}

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Pending,
    Archived,
}

/// How the coordinate was captured. `High` means pinned on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationAccuracy {
    High,
    Low,
}

/// Listing currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ghs,
    Usd,
}

/// Community vote counters for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub good: u32,
    pub bad: u32,
    pub scam: u32,
}

impl VoteTally {
    #[must_use]
    pub const fn new(good: u32, bad: u32, scam: u32) -> Self {
        Self { good, bad, scam }
    }

    /// Combined negative votes.
    #[must_use]
    pub const fn negative(&self) -> u32 {
        self.bad + self.scam
    }

    /// Good votes minus combined negative votes.
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.good as i64 - self.negative() as i64
    }
}

/// Owner verification tier, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationTier {
    ProAgent,
    VerifiedScout,
    Basic,
}

/// The slice of an owner profile the scorer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub id: OwnerId,
    pub display_name: String,
    pub verification_tier: VerificationTier,
}

/// A single property record.
///
/// Immutable once inserted, except for the fields an explicit
/// [`ListingEdit`] may update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    id: ListingId,
    owner_id: Option<OwnerId>,
    title: String,
    description: String,
    price: Decimal,
    currency: Currency,
    transaction: TransactionType,
    status: ListingStatus,
    coordinate: Option<GeoPoint>,
    location_name: String,
    address: Option<String>,
    accuracy: LocationAccuracy,
    features: Vec<String>,
    votes: VoteTally,
    cover_image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Listing {
    /// Create a listing with the required core fields. Optional fields
    /// start at their documented defaults and are set with the `with_*`
    /// builders.
    pub fn new(
        id: ListingId,
        title: impl Into<String>,
        price: Decimal,
        transaction: TransactionType,
        location_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner_id: None,
            title: title.into(),
            description: String::new(),
            price: price.max(Decimal::ZERO),
            currency: Currency::Ghs,
            transaction,
            status: ListingStatus::Active,
            coordinate: None,
            location_name: location_name.into(),
            address: None,
            accuracy: LocationAccuracy::Low,
            features: Vec::new(),
            votes: VoteTally::default(),
            cover_image_url: None,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_coordinate(mut self, coordinate: GeoPoint) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: LocationAccuracy) -> Self {
        self.accuracy = accuracy;
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn with_votes(mut self, votes: VoteTally) -> Self {
        self.votes = votes;
        self
    }

    #[must_use]
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&OwnerId> {
        self.owner_id.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub const fn transaction(&self) -> TransactionType {
        self.transaction
    }

    #[must_use]
    pub const fn status(&self) -> ListingStatus {
        self.status
    }

    #[must_use]
    pub const fn coordinate(&self) -> Option<GeoPoint> {
        self.coordinate
    }

    #[must_use]
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub const fn accuracy(&self) -> LocationAccuracy {
        self.accuracy
    }

    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    #[must_use]
    pub const fn votes(&self) -> VoteTally {
        self.votes
    }

    #[must_use]
    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply an edit, returning the updated listing. Only the fields an
    /// edit may touch (price, description, cover image, status) change.
    #[must_use]
    pub fn apply_edit(mut self, edit: ListingEdit) -> Self {
        if let Some(price) = edit.price {
            self.price = price.max(Decimal::ZERO);
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(cover_image_url) = edit.cover_image_url {
            self.cover_image_url = Some(cover_image_url);
        }
        if let Some(status) = edit.status {
            self.status = status;
        }
        self
    }
}

/// The fields an edit operation is allowed to update.
#[derive(Debug, Clone, Default)]
pub struct ListingEdit {
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: Option<ListingStatus>,
}

/// Source id field: integer or string depending on schema generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

/// Source price field: a bare number or a string with symbols/commas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Amount(Decimal),
    Text(String),
}

/// Source feature field: an array or a comma-joined string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    List(Vec<String>),
    Text(String),
}

/// The loosely typed record shape emitted by the datastore collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListing {
    pub id: Option<RawId>,
    pub owner_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<RawPrice>,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub transaction: Option<String>,
    pub status: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub location_accuracy: Option<String>,
    pub features: Option<RawTags>,
    pub votes_good: Option<u32>,
    pub votes_bad: Option<u32>,
    pub votes_scam: Option<u32>,
    pub cover_image_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawListing {
    /// Produce a strongly typed [`Listing`], or `None` for records that
    /// lack an id or a title. Every loose field resolves to its
    /// documented default here and nowhere else.
    #[must_use]
    pub fn normalize(self) -> Option<Listing> {
        let id = match self.id? {
            RawId::Int(n) => ListingId::from(n),
            RawId::Text(s) => ListingId::from(s),
        };
        let title = self.title.filter(|t| !t.trim().is_empty())?;

        let price = match self.price {
            Some(RawPrice::Amount(d)) => d.max(Decimal::ZERO),
            Some(RawPrice::Text(s)) => parse_price_text(&s),
            None => Decimal::ZERO,
        };

        let coordinate = match (self.lat, self.long) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        let features = match self.features {
            Some(RawTags::List(list)) => list
                .into_iter()
                .map(|t| strip_tag_punctuation(&t))
                .filter(|t| !t.is_empty())
                .collect(),
            Some(RawTags::Text(text)) => split_tag_text(&text),
            None => Vec::new(),
        };

        let cover_image_url = self
            .cover_image_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.image_urls.and_then(|urls| urls.into_iter().next()));

        let mut listing = Listing::new(
            id,
            title,
            price,
            parse_transaction(self.transaction.as_deref()),
            self.location_name.unwrap_or_default(),
        )
        .with_currency(parse_currency(self.currency.as_deref()))
        .with_status(parse_status(self.status.as_deref()))
        .with_accuracy(parse_accuracy(self.location_accuracy.as_deref()))
        .with_features(features)
        .with_votes(VoteTally::new(
            self.votes_good.unwrap_or(0),
            self.votes_bad.unwrap_or(0),
            self.votes_scam.unwrap_or(0),
        ));

        if let Some(owner) = self.owner_id.filter(|o| !o.is_empty()) {
            listing = listing.with_owner(OwnerId::from(owner));
        }
        if let Some(point) = coordinate {
            listing = listing.with_coordinate(point);
        }
        if let Some(address) = self.address {
            listing = listing.with_address(address);
        }
        if let Some(description) = self.description {
            listing = listing.with_description(description);
        }
        if let Some(url) = cover_image_url {
            listing = listing.with_cover_image(url);
        }
        if let Some(created_at) = self.created_at {
            listing = listing.with_created_at(created_at);
        }

        Some(listing)
    }
}

/// Parse a price written as text, e.g. `"GH₵ 6,500"` or `"$1200"`.
/// Unparseable text resolves to zero.
fn parse_price_text(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<Decimal>()
        .map(|d| d.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Split a comma-joined tag string, stripping bracket/quote punctuation.
fn split_tag_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(strip_tag_punctuation)
        .filter(|t| !t.is_empty())
        .collect()
}

fn strip_tag_punctuation(tag: &str) -> String {
    tag.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '[' | ']' | '"' | '\'' | '{' | '}')
    })
    .to_string()
}

fn parse_transaction(raw: Option<&str>) -> TransactionType {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("rent") => TransactionType::Rent,
        _ => TransactionType::Sale,
    }
}

fn parse_status(raw: Option<&str>) -> ListingStatus {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("pending") => ListingStatus::Pending,
        Some("archived") | Some("inactive") => ListingStatus::Archived,
        _ => ListingStatus::Active,
    }
}

fn parse_accuracy(raw: Option<&str>) -> LocationAccuracy {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("high") => LocationAccuracy::High,
        _ => LocationAccuracy::Low,
    }
}

fn parse_currency(raw: Option<&str>) -> Currency {
    match raw.map(str::to_ascii_uppercase).as_deref() {
        Some("USD") => Currency::Usd,
        _ => Currency::Ghs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(id: i64, title: &str) -> RawListing {
        RawListing {
            id: Some(RawId::Int(id)),
            title: Some(title.to_string()),
            ..RawListing::default()
        }
    }

    #[test]
    fn normalize_requires_id_and_title() {
        assert!(RawListing::default().normalize().is_none());

        let no_title = RawListing {
            id: Some(RawId::Int(1)),
            ..RawListing::default()
        };
        assert!(no_title.normalize().is_none());

        assert!(raw(1, "2 Bed Apartment").normalize().is_some());
    }

    #[test]
    fn price_text_with_symbols_parses() {
        let mut r = raw(1, "Flat");
        r.price = Some(RawPrice::Text("GH₵ 6,500".to_string()));
        let listing = r.normalize().unwrap();
        assert_eq!(listing.price(), dec!(6500));
    }

    #[test]
    fn garbage_price_defaults_to_zero() {
        let mut r = raw(1, "Flat");
        r.price = Some(RawPrice::Text("call for price".to_string()));
        assert_eq!(r.normalize().unwrap().price(), Decimal::ZERO);
    }

    #[test]
    fn negative_price_clamped() {
        let mut r = raw(1, "Flat");
        r.price = Some(RawPrice::Amount(dec!(-100)));
        assert_eq!(r.normalize().unwrap().price(), Decimal::ZERO);
    }

    #[test]
    fn tag_string_splits_and_strips() {
        let mut r = raw(1, "Flat");
        r.features = Some(RawTags::Text("[\"Pool\", 'Gym', Garden]".to_string()));
        let listing = r.normalize().unwrap();
        assert_eq!(listing.features(), ["Pool", "Gym", "Garden"]);
    }

    #[test]
    fn cover_image_falls_back_to_first_image_url() {
        let mut r = raw(1, "Flat");
        r.image_urls = Some(vec!["https://cdn.example/a.jpg".into()]);
        let listing = r.normalize().unwrap();
        assert_eq!(listing.cover_image_url(), Some("https://cdn.example/a.jpg"));
    }

    #[test]
    fn coordinate_requires_both_axes() {
        let mut r = raw(1, "Flat");
        r.lat = Some(5.6);
        assert!(r.normalize().unwrap().coordinate().is_none());
    }

    #[test]
    fn mixed_id_types_become_strings() {
        let mut r = raw(7, "Flat");
        assert_eq!(r.clone().normalize().unwrap().id().as_str(), "7");
        r.id = Some(RawId::Text("uuid-abc".into()));
        assert_eq!(r.normalize().unwrap().id().as_str(), "uuid-abc");
    }

    #[test]
    fn edit_touches_only_allowed_fields() {
        let listing = raw(1, "Flat").normalize().unwrap();
        let created = listing.created_at();
        let edited = listing.apply_edit(ListingEdit {
            price: Some(dec!(900)),
            description: Some("repainted".into()),
            ..ListingEdit::default()
        });
        assert_eq!(edited.price(), dec!(900));
        assert_eq!(edited.description(), "repainted");
        assert_eq!(edited.created_at(), created);
        assert_eq!(edited.title(), "Flat");
    }

    #[test]
    fn vote_tally_net_math() {
        let votes = VoteTally::new(12, 1, 0);
        assert_eq!(votes.net(), 11);
        assert_eq!(votes.negative(), 1);

        let flagged = VoteTally::new(2, 4, 3);
        assert_eq!(flagged.net(), -5);
    }
}
