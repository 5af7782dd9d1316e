use std::cmp::Ordering;

use farewise_catalog::{FixtureStore, ProviderDirectory};
use farewise_core::{DurationParseError, FareRecord, Price};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::criteria::{FilterCriteria, SearchCriteria, SortDirection, SortKey};
use crate::predicate::FarePredicate;
use crate::ListingResult;

/// A fare left out of a duration-sorted listing because its duration text
/// could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedFare {
    pub fare_id: String,
    pub reason: DurationParseError,
}

/// Ordered result of a search. An empty listing is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub fares: Vec<FareRecord>,
    pub excluded: Vec<ExcludedFare>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.fares.iter().map(|f| f.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum SortValue {
    Price(Price),
    Minutes(u32),
    Rating(f64),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Price(a), SortValue::Price(b)) => a.cmp(b),
            (SortValue::Minutes(a), SortValue::Minutes(b)) => a.cmp(b),
            (SortValue::Rating(a), SortValue::Rating(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn sort_value(fare: &FareRecord, key: SortKey) -> Result<SortValue, DurationParseError> {
    Ok(match key {
        SortKey::Price => SortValue::Price(fare.effective_price()),
        SortKey::Duration => SortValue::Minutes(fare.travel_duration()?.minutes()),
        SortKey::Rating => SortValue::Rating(fare.rating),
    })
}

/// Stable sort of `fares` by `key`. Equal values keep their input order in
/// both directions.
pub fn sort(fares: Vec<FareRecord>, key: SortKey, direction: SortDirection) -> Listing {
    let mut keyed = Vec::with_capacity(fares.len());
    let mut excluded = Vec::new();

    for fare in fares {
        match sort_value(&fare, key) {
            Ok(value) => keyed.push((value, fare)),
            Err(reason) => {
                warn!("Excluding fare {} from {} sort: {}", fare.id, key, reason);
                excluded.push(ExcludedFare {
                    fare_id: fare.id,
                    reason,
                });
            }
        }
    }

    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));

    Listing {
        fares: keyed.into_iter().map(|(_, fare)| fare).collect(),
        excluded,
    }
}

/// Filter `records` by both predicates, then sort. Never touches `records`.
pub fn apply<S, F>(
    records: &[FareRecord],
    search: &S,
    filter: &F,
    key: SortKey,
    direction: SortDirection,
) -> Listing
where
    S: FarePredicate + ?Sized,
    F: FarePredicate + ?Sized,
{
    let matched: Vec<FareRecord> = records
        .iter()
        .filter(|fare| search.matches(fare) && filter.matches(fare))
        .cloned()
        .collect();
    debug!(
        "{} of {} fares matched, sorting by {} {}",
        matched.len(),
        records.len(),
        key,
        direction.as_str()
    );
    sort(matched, key, direction)
}

/// Everything one listing needs: criteria plus ordering
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingRequest {
    #[serde(default)]
    pub search: SearchCriteria,
    #[serde(default)]
    pub filter: FilterCriteria,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl ListingRequest {
    /// Run against a store. Fails only on invalid criteria.
    pub fn run(&self, store: &FixtureStore) -> ListingResult<Listing> {
        self.run_over(store.fares(), store.providers())
    }

    pub fn run_over(
        &self,
        records: &[FareRecord],
        providers: &ProviderDirectory,
    ) -> ListingResult<Listing> {
        let search = self.search.predicate();
        let filter = self.filter.predicate(providers)?;
        Ok(apply(records, &search, &filter, self.sort_key, self.sort_direction))
    }
}
