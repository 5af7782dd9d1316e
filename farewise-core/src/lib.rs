pub mod currency;
pub mod duration;
pub mod fare;
pub mod intents;
pub mod session;

pub use currency::DisplayCurrency;
pub use duration::{DurationParseError, TravelDuration};
pub use fare::{FareRecord, Price, TransportMode};
pub use session::{Role, SessionContext};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid duration: {0}")]
    DurationError(#[from] DurationParseError),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
