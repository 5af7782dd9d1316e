use chrono::NaiveDate;
use farewise_core::{Price, TransportMode};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::{ListingError, ListingResult};

/// Free-text route search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// Shown back to the user only; fares are not dated
    pub travel_date: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive bounds over the effective price
    pub min_price: Price,
    pub max_price: Price,
    /// Empty means nothing selected, which matches no fare
    pub transport_modes: BTreeSet<TransportMode>,
    /// Stable provider ids; empty means any provider
    pub providers: BTreeSet<String>,
    /// No fare records transfers, so this has no effect
    pub direct_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_price: Price::ZERO,
            max_price: Price::MAX,
            transport_modes: TransportMode::ALL.into_iter().collect(),
            providers: BTreeSet::new(),
            direct_only: false,
        }
    }
}

impl FilterCriteria {
    pub fn with_price_range(mut self, min: Price, max: Price) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_modes<I: IntoIterator<Item = TransportMode>>(mut self, modes: I) -> Self {
        self.transport_modes = modes.into_iter().collect();
        self
    }

    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> ListingResult<()> {
        if self.min_price > self.max_price {
            return Err(ListingError::ValidationError(format!(
                "minimum price {:.2} is above maximum price {:.2}",
                self.min_price.as_decimal(),
                self.max_price.as_decimal()
            )));
        }
        if self.min_price < Price::ZERO {
            return Err(ListingError::ValidationError(
                "minimum price cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            "rating" => Ok(SortKey::Rating),
            other => Err(ListingError::ValidationError(format!(
                "unknown sort key '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ListingError::ValidationError(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_accepts_every_mode() {
        let filter = FilterCriteria::default();
        assert_eq!(filter.transport_modes.len(), 4);
        assert!(filter.providers.is_empty());
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_inverted_price_range_is_rejected() {
        let filter = FilterCriteria::default()
            .with_price_range(Price::from_major(2000), Price::from_major(1000));
        assert!(matches!(filter.validate(), Err(ListingError::ValidationError(_))));

        let point = FilterCriteria::default()
            .with_price_range(Price::from_major(1000), Price::from_major(1000));
        assert!(point.validate().is_ok());
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("Duration".parse::<SortKey>().unwrap(), SortKey::Duration);
        assert!("departure".parse::<SortKey>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
    }
}
