use std::sync::Arc;

use farewise_catalog::FixtureStore;
use farewise_listing::ComparisonConfig;

use crate::app_config::{Config, DisplayConfig, ListingConfig};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FixtureStore>,
    pub listing: ListingConfig,
    pub display: DisplayConfig,
    pub comparison: ComparisonConfig,
}

impl AppState {
    pub fn new(store: Arc<FixtureStore>, config: &Config) -> Self {
        Self {
            store,
            listing: config.listing.clone(),
            display: config.display.clone(),
            comparison: config.comparison.clone(),
        }
    }
}
