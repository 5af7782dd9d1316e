pub mod compare;
pub mod criteria;
pub mod engine;
pub mod predicate;
pub mod session;

pub use compare::{CompanySelection, Comparison, ComparisonConfig};
pub use criteria::{FilterCriteria, SearchCriteria, SortDirection, SortKey};
pub use engine::{ExcludedFare, Listing, ListingRequest};
pub use predicate::FarePredicate;
pub use session::ListingSession;

use farewise_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Search {generation} was superseded by a newer search")]
    Superseded { generation: u64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ListingResult<T> = Result<T, ListingError>;
