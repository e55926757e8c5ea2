#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use landsight::config::Config;
use landsight::domain::{Listing, ListingSnapshot};

/// A config with short store delays so retry paths finish quickly.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.store.resubscribe_delay_secs = 1;
    config
}

/// An immutable snapshot over owned listings.
pub fn snapshot_of(listings: Vec<Listing>) -> ListingSnapshot {
    ListingSnapshot::from_listings(listings.into_iter().map(Arc::new).collect())
}

/// Poll a condition until it holds, yielding between attempts. Panics
/// after the attempt budget so a broken event path fails fast instead
/// of hanging the test.
pub async fn wait_until<F>(what: &str, mut condition: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {what}");
}
