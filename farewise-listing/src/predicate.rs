use farewise_catalog::ProviderDirectory;
use farewise_core::FareRecord;
use tracing::warn;

use crate::criteria::{FilterCriteria, SearchCriteria};
use crate::ListingResult;

/// Accept/reject decision over a fare
pub trait FarePredicate {
    fn matches(&self, fare: &FareRecord) -> bool;
}

impl<F> FarePredicate for F
where
    F: Fn(&FareRecord) -> bool,
{
    fn matches(&self, fare: &FareRecord) -> bool {
        self(fare)
    }
}

/// Case-insensitive origin/destination substring match
#[derive(Debug, Clone)]
pub struct SearchPredicate {
    origin: String,
    destination: String,
}

impl SearchPredicate {
    pub fn accepts_all(&self) -> bool {
        self.origin.is_empty() && self.destination.is_empty()
    }
}

impl FarePredicate for SearchPredicate {
    fn matches(&self, fare: &FareRecord) -> bool {
        (self.origin.is_empty() || fare.origin.to_lowercase().contains(&self.origin))
            && (self.destination.is_empty()
                || fare.destination.to_lowercase().contains(&self.destination))
    }
}

impl SearchCriteria {
    pub fn predicate(&self) -> SearchPredicate {
        SearchPredicate {
            origin: self.origin.trim().to_lowercase(),
            destination: self.destination.trim().to_lowercase(),
        }
    }
}

/// Price, mode and provider filter. Provider names are resolved to stable
/// ids through the store's directory.
#[derive(Debug)]
pub struct FilterPredicate<'a> {
    criteria: &'a FilterCriteria,
    providers: &'a ProviderDirectory,
}

impl FarePredicate for FilterPredicate<'_> {
    fn matches(&self, fare: &FareRecord) -> bool {
        let price = fare.effective_price();
        if price < self.criteria.min_price || price > self.criteria.max_price {
            return false;
        }
        if !self.criteria.transport_modes.contains(&fare.transport_mode) {
            return false;
        }
        if !self.criteria.providers.is_empty()
            && !self.criteria.providers.contains(&self.providers.resolve(&fare.provider))
        {
            return false;
        }
        true
    }
}

impl FilterCriteria {
    pub fn predicate<'a>(&'a self, providers: &'a ProviderDirectory) -> ListingResult<FilterPredicate<'a>> {
        self.validate()?;
        if self.direct_only {
            // TODO: apply once fares carry a transfer count
            warn!("direct_only filter requested but fares carry no transfer data; ignoring");
        }
        Ok(FilterPredicate {
            criteria: self,
            providers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewise_catalog::FixtureStore;
    use farewise_core::{Price, TransportMode};

    fn store() -> FixtureStore {
        FixtureStore::seeded().unwrap()
    }

    #[test]
    fn test_empty_search_accepts_everything() {
        let predicate = SearchCriteria::default().predicate();
        assert!(predicate.accepts_all());
        assert!(store().fares().iter().all(|f| predicate.matches(f)));

        let blank = SearchCriteria::new("   ", "").predicate();
        assert!(blank.accepts_all());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = store();
        let predicate = SearchCriteria::new("ENU", "river").predicate();
        let ids: Vec<&str> = store
            .fares()
            .iter()
            .filter(|f| predicate.matches(f))
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["8"]);

        let destination_only = SearchCriteria::new("", "nsukka").predicate();
        assert_eq!(store.fares().iter().filter(|f| destination_only.matches(f)).count(), 2);
    }

    #[test]
    fn test_price_bounds_are_inclusive_on_effective_price() {
        let store = store();
        // fare 2 is 1300 less 10% = 1170, fare 7 is 600
        let filter = FilterCriteria::default()
            .with_price_range(Price::from_major(600), Price::from_major(1170));
        let predicate = filter.predicate(store.providers()).unwrap();
        let ids: Vec<&str> = store
            .fares()
            .iter()
            .filter(|f| predicate.matches(f))
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "5", "6", "7", "8"]);
        for fare in store.fares().iter().filter(|f| predicate.matches(f)) {
            let price = fare.effective_price();
            assert!(price >= filter.min_price && price <= filter.max_price);
        }
    }

    #[test]
    fn test_filter_handles_very_large_discounted_prices() {
        let store = FixtureStore::from_fares(vec![FareRecord::new(
            "big",
            "GUO Transport",
            "Enugu",
            "Nsukka",
            Price::from_minor(i64::MAX / 2),
        )
        .with_discount(10)])
        .unwrap();
        let criteria = FilterCriteria::default();
        let predicate = criteria.predicate(store.providers()).unwrap();
        assert!(predicate.matches(&store.fares()[0]));
    }

    #[test]
    fn test_no_selected_modes_rejects_everything() {
        let store = store();
        let filter = FilterCriteria::default().with_modes([]);
        let predicate = filter.predicate(store.providers()).unwrap();
        assert!(!store.fares().iter().any(|f| predicate.matches(f)));

        let trains = FilterCriteria::default().with_modes([TransportMode::Train]);
        let predicate = trains.predicate(store.providers()).unwrap();
        assert!(!store.fares().iter().any(|f| predicate.matches(f)));
    }

    #[test]
    fn test_provider_filter_uses_directory_ids() {
        let store = store();
        let filter = FilterCriteria::default().with_providers(["peace-mass", "gigm"]);
        let predicate = filter.predicate(store.providers()).unwrap();
        let ids: Vec<&str> = store
            .fares()
            .iter()
            .filter(|f| predicate.matches(f))
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4", "7"]);

        // The legacy slug of "Peace Mass Transit" is not a provider id
        let legacy = FilterCriteria::default().with_providers(["peace-mass-transit"]);
        let predicate = legacy.predicate(store.providers()).unwrap();
        assert_eq!(store.fares().iter().filter(|f| predicate.matches(f)).count(), 0);
    }

    #[test]
    fn test_unknown_provider_matches_by_legacy_slug() {
        let store = FixtureStore::from_fares(vec![FareRecord::new(
            "x1",
            "Young Shall Grow",
            "Onitsha",
            "Lagos",
            Price::from_major(9000),
        )])
        .unwrap();
        let filter = FilterCriteria::default().with_providers(["young-shall-grow"]);
        let predicate = filter.predicate(store.providers()).unwrap();
        assert!(predicate.matches(&store.fares()[0]));
    }

    #[test]
    fn test_direct_only_has_no_effect() {
        let store = store();
        let mut filter = FilterCriteria::default();
        filter.direct_only = true;
        let predicate = filter.predicate(store.providers()).unwrap();
        assert_eq!(store.fares().iter().filter(|f| predicate.matches(f)).count(), 8);
    }

    #[test]
    fn test_invalid_range_fails_to_build() {
        let store = store();
        let filter = FilterCriteria::default()
            .with_price_range(Price::from_major(10), Price::from_major(5));
        assert!(filter.predicate(store.providers()).is_err());
    }
}
