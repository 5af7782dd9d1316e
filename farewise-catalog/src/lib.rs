pub mod fixtures;
pub mod providers;
pub mod repository;
pub mod store;

pub use fixtures::{Company, Destination, Review};
pub use providers::{legacy_provider_slug, ProviderDirectory};
pub use repository::FareRepository;
pub use store::{CatalogError, CatalogResult, FixtureStore};
