use farewise_core::DisplayCurrency;
use farewise_listing::{ComparisonConfig, SortDirection, SortKey};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Ordering used when a search does not ask for one
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ListingConfig {
    #[serde(default)]
    pub default_sort_key: SortKey,
    #[serde(default)]
    pub default_sort_direction: SortDirection,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    /// Label for rendered amounts; never converts prices
    #[serde(default)]
    pub currency: DisplayCurrency,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, uncommitted overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `FAREWISE__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("FAREWISE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
