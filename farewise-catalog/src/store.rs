use std::collections::{HashMap, HashSet};

use farewise_core::{FareRecord, Price};
use tracing::{info, warn};

use crate::fixtures::{self, Company, Destination, Review};
use crate::providers::ProviderDirectory;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate fare id: {0}")]
    DuplicateFareId(String),

    #[error("Fare {id} has a non-positive base price ({minor} minor units)")]
    NonPositivePrice { id: String, minor: i64 },

    #[error("Fare {id} has discount {percent}% outside 0-100")]
    DiscountOutOfRange { id: String, percent: u8 },

    #[error("Fare {id} has rating {rating} outside 0-5")]
    RatingOutOfRange { id: String, rating: f64 },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable in-memory catalog: fares, operators, destinations, reviews and
/// route price history. Loaded once and only ever read afterwards.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    fares: Vec<FareRecord>,
    index: HashMap<String, usize>,
    companies: Vec<Company>,
    destinations: Vec<Destination>,
    reviews: Vec<Review>,
    history: HashMap<String, Vec<Price>>,
    providers: ProviderDirectory,
}

impl FixtureStore {
    /// Build a store, checking record invariants.
    ///
    /// Unparseable durations are logged but kept; the listing engine drops
    /// such records from duration-sorted results.
    pub fn new(
        fares: Vec<FareRecord>,
        companies: Vec<Company>,
        destinations: Vec<Destination>,
        reviews: Vec<Review>,
        history: Vec<(String, Vec<Price>)>,
    ) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(fares.len());
        for (position, fare) in fares.iter().enumerate() {
            validate_fare(fare)?;
            if index.insert(fare.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateFareId(fare.id.clone()));
            }
            if let Err(e) = fare.travel_duration() {
                warn!("Fare {} has an unparseable duration: {}", fare.id, e);
            }
        }

        let providers = ProviderDirectory::from_companies(&companies);
        let unmapped: HashSet<&str> = fares
            .iter()
            .filter(|f| providers.lookup(&f.provider).is_none())
            .map(|f| f.provider.as_str())
            .collect();
        for provider in unmapped {
            warn!(
                "Provider '{}' is not in the company directory, filtering uses '{}'",
                provider,
                providers.resolve(provider)
            );
        }

        info!(
            "Fixture store loaded: {} fares, {} companies, {} destinations",
            fares.len(),
            companies.len(),
            destinations.len()
        );

        Ok(Self {
            fares,
            index,
            companies,
            destinations,
            reviews,
            history: history.into_iter().collect(),
            providers,
        })
    }

    /// Store loaded with the bundled sample data
    pub fn seeded() -> CatalogResult<Self> {
        Self::new(
            fixtures::transport_fares(),
            fixtures::companies(),
            fixtures::popular_destinations(),
            fixtures::reviews(),
            fixtures::price_history(),
        )
    }

    /// Store holding only fares, for callers that bring their own data
    pub fn from_fares(fares: Vec<FareRecord>) -> CatalogResult<Self> {
        Self::new(fares, fixtures::companies(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn fares(&self) -> &[FareRecord] {
        &self.fares
    }

    pub fn get(&self, id: &str) -> Option<&FareRecord> {
        self.index.get(id).map(|&i| &self.fares[i])
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn providers(&self) -> &ProviderDirectory {
        &self.providers
    }

    pub fn reviews_for(&self, fare_id: &str) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.fare_id == fare_id).collect()
    }

    pub fn price_history(&self, route_code: &str) -> Option<&[Price]> {
        self.history
            .get(&route_code.trim().to_ascii_uppercase())
            .map(Vec::as_slice)
    }

    /// "ENU-NSK" style code for a pair of destination names
    pub fn route_code(&self, origin: &str, destination: &str) -> Option<String> {
        let code = |name: &str| {
            self.destinations
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
                .map(|d| d.code.clone())
        };
        Some(format!("{}-{}", code(origin)?, code(destination)?))
    }

    /// Destinations whose name or code contains `query`, case-insensitive.
    /// An empty query suggests everything.
    pub fn suggest_destinations(&self, query: &str) -> Vec<&Destination> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.destinations.iter().collect();
        }
        let mut matches: Vec<&Destination> = self
            .destinations
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle) || d.code.to_lowercase().contains(&needle)
            })
            .collect();
        // Prefix matches first, keeping fixture order within each group
        matches.sort_by_key(|d| !d.name.to_lowercase().starts_with(&needle));
        matches
    }
}

fn validate_fare(fare: &FareRecord) -> CatalogResult<()> {
    if !fare.base_price.is_positive() {
        return Err(CatalogError::NonPositivePrice {
            id: fare.id.clone(),
            minor: fare.base_price.minor(),
        });
    }
    if let Some(percent) = fare.discount_percent {
        if percent > 100 {
            return Err(CatalogError::DiscountOutOfRange {
                id: fare.id.clone(),
                percent,
            });
        }
    }
    if !(0.0..=5.0).contains(&fare.rating) {
        return Err(CatalogError::RatingOutOfRange {
            id: fare.id.clone(),
            rating: fare.rating,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare(id: &str, major: i64) -> FareRecord {
        FareRecord::new(id, "GUO Transport", "Enugu", "Nsukka", Price::from_major(major))
    }

    #[test]
    fn test_seeded_store() {
        let store = FixtureStore::seeded().unwrap();
        assert_eq!(store.fares().len(), 8);
        assert_eq!(store.companies().len(), 6);
        assert_eq!(store.get("3").unwrap().destination, "Owerri");
        assert!(store.get("99").is_none());
        assert_eq!(store.reviews_for("1").len(), 2);
        assert!(store.reviews_for("8").is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = FixtureStore::from_fares(vec![fare("a", 100), fare("a", 200)]);
        assert!(matches!(result, Err(CatalogError::DuplicateFareId(id)) if id == "a"));
    }

    #[test]
    fn test_rejects_invalid_prices_and_discounts() {
        assert!(matches!(
            FixtureStore::from_fares(vec![fare("a", 0)]),
            Err(CatalogError::NonPositivePrice { .. })
        ));
        assert!(matches!(
            FixtureStore::from_fares(vec![fare("a", 100).with_discount(101)]),
            Err(CatalogError::DiscountOutOfRange { percent: 101, .. })
        ));
        assert!(matches!(
            FixtureStore::from_fares(vec![fare("a", 100).with_rating(5.5)]),
            Err(CatalogError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn test_keeps_unparseable_durations() {
        let store = FixtureStore::from_fares(vec![fare("a", 100).with_duration("soon")]).unwrap();
        assert_eq!(store.fares().len(), 1);
    }

    #[test]
    fn test_route_code_and_history() {
        let store = FixtureStore::seeded().unwrap();
        assert_eq!(store.route_code("enugu", "Nsukka").as_deref(), Some("ENU-NSK"));
        assert_eq!(store.route_code("Enugu", "Lagos"), None);

        let history = store.price_history("enu-nsk").unwrap();
        assert_eq!(history.len(), 7);
        assert_eq!(history[0], Price::from_major(1200));
        assert!(store.price_history("ENU-UDI").is_none());
    }

    #[test]
    fn test_destination_suggestions() {
        let store = FixtureStore::seeded().unwrap();
        let names: Vec<&str> = store
            .suggest_destinations("u")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Udi", "Enugu", "Nsukka", "Awgu", "Ezeagu", "Nkanu"]);

        assert_eq!(store.suggest_destinations("").len(), 10);
        assert_eq!(store.suggest_destinations("OWE")[0].name, "Owerri");
    }
}
