//! Factories for domain values used across unit and integration tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    Listing, ListingId, OwnerId, OwnerProfile, RawId, RawListing, RawPrice, TransactionType,
    VerificationTier,
};

/// A minimal active sale listing in East Legon.
pub fn listing(id: &str, title: &str) -> Listing {
    Listing::new(
        ListingId::from(id),
        title,
        dec!(250_000),
        TransactionType::Sale,
        "East Legon, Accra",
    )
}

/// A listing with an explicit price and transaction type.
pub fn priced_listing(
    id: &str,
    title: &str,
    price: Decimal,
    transaction: TransactionType,
) -> Listing {
    Listing::new(ListingId::from(id), title, price, transaction, "Accra")
}

/// A minimal raw record that survives normalization.
pub fn raw_listing(id: i64, title: &str) -> RawListing {
    RawListing {
        id: Some(RawId::Int(id)),
        title: Some(title.to_owned()),
        price: Some(RawPrice::Amount(dec!(250_000))),
        location_name: Some("East Legon, Accra".to_owned()),
        status: Some("active".to_owned()),
        ..RawListing::default()
    }
}

/// An owner at the given verification tier.
pub fn owner(id: &str, tier: VerificationTier) -> OwnerProfile {
    OwnerProfile {
        id: OwnerId::from(id),
        display_name: format!("Owner {id}"),
        verification_tier: tier,
    }
}
