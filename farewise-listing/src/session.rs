use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use farewise_catalog::FareRepository;
use farewise_core::FareRecord;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::criteria::{FilterCriteria, SearchCriteria, SortDirection, SortKey};
use crate::engine::{self, Listing};
use crate::predicate::FarePredicate;
use crate::{ListingError, ListingResult};

struct Visible {
    /// Every fare that passed the predicates, before any sort exclusion
    matched: Vec<FareRecord>,
    listing: Listing,
    sort_key: SortKey,
    direction: SortDirection,
}

/// The list one viewer currently sees.
///
/// Searches are last-writer-wins: a search that finishes after a newer one
/// has started is dropped with [`ListingError::Superseded`] and leaves the
/// visible list alone. Invalid criteria also leave it untouched.
pub struct ListingSession {
    repository: Arc<dyn FareRepository>,
    latency: Duration,
    generation: AtomicU64,
    visible: Mutex<Visible>,
}

impl ListingSession {
    pub fn new(repository: Arc<dyn FareRepository>) -> Self {
        Self {
            repository,
            latency: Duration::ZERO,
            generation: AtomicU64::new(0),
            visible: Mutex::new(Visible {
                matched: Vec::new(),
                listing: Listing::default(),
                sort_key: SortKey::default(),
                direction: SortDirection::default(),
            }),
        }
    }

    /// Delay every search by `latency` before reading fares
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Show the whole catalog in the current order
    pub async fn load(&self) -> ListingResult<Listing> {
        self.search(SearchCriteria::default(), FilterCriteria::default()).await
    }

    pub async fn search(&self, search: SearchCriteria, filter: FilterCriteria) -> ListingResult<Listing> {
        filter.validate()?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Search {} started: {:?}", generation, search);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let records = self.repository.list_fares().await?;
        let search_predicate = search.predicate();
        let filter_predicate = filter.predicate(self.repository.provider_directory())?;
        let matched: Vec<FareRecord> = records
            .into_iter()
            .filter(|f| search_predicate.matches(f) && filter_predicate.matches(f))
            .collect();

        let mut visible = self.visible.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Search {} superseded, discarding {} fares", generation, matched.len());
            return Err(ListingError::Superseded { generation });
        }
        // Sort with the settings current at publish time
        let listing = engine::sort(matched.clone(), visible.sort_key, visible.direction);
        visible.matched = matched;
        visible.listing = listing.clone();

        info!("Search completed: found {} transport options", listing.len());
        Ok(listing)
    }

    /// Sort by `key`. Choosing the current key again flips the direction; a
    /// new key starts ascending.
    pub async fn sort_by(&self, key: SortKey) -> Listing {
        let mut visible = self.visible.lock().await;
        if visible.sort_key == key {
            visible.direction = visible.direction.toggled();
        } else {
            visible.sort_key = key;
            visible.direction = SortDirection::Ascending;
        }

        let sorted = engine::sort(visible.matched.clone(), visible.sort_key, visible.direction);
        visible.listing = sorted.clone();
        sorted
    }

    pub async fn visible(&self) -> Listing {
        self.visible.lock().await.listing.clone()
    }

    pub async fn sort_state(&self) -> (SortKey, SortDirection) {
        let visible = self.visible.lock().await;
        (visible.sort_key, visible.direction)
    }
}
