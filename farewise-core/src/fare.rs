use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::duration::{DurationParseError, TravelDuration};
use crate::CoreError;

/// Mode of transport offered by a fare
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Bus,
    Train,
    Ferry,
    Flight,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Ferry,
        TransportMode::Flight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Ferry => "ferry",
            TransportMode::Flight => "flight",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "ferry" => Ok(TransportMode::Ferry),
            "flight" => Ok(TransportMode::Flight),
            other => Err(CoreError::ValidationError(format!(
                "unknown transport mode '{}'",
                other
            ))),
        }
    }
}

/// Monetary amount in minor units (kobo, cents).
///
/// Two-decimal rounding of discounted prices happens once, in
/// [`Price::discounted`], so every comparison downstream is exact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const MAX: Price = Price(i64::MAX);

    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Convert a decimal amount, rounding to the nearest minor unit.
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    pub fn minor(&self) -> i64 {
        self.0
    }

    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Apply a percentage discount, rounding half up to the minor unit.
    pub fn discounted(&self, percent: u8) -> Price {
        let keep = 100 - i128::from(percent.min(100));
        let scaled = (i128::from(self.0) * keep + 50).div_euclid(100);
        // |scaled| never exceeds |self.0| + 1, so this only clamps at i64::MAX
        Price(i64::try_from(scaled).unwrap_or(i64::MAX))
    }
}

/// One transport offering in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FareRecord {
    pub id: String,
    pub provider: String,
    pub origin: String,
    pub destination: String,
    pub base_price: Price,
    pub discount_percent: Option<u8>,
    /// Free-text travel time as published by the provider, e.g. "1h 30m"
    pub duration: String,
    /// Display only, never used for ordering
    pub departure_time: String,
    pub transport_mode: TransportMode,
    pub rating: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
}

impl FareRecord {
    pub fn new(
        id: impl Into<String>,
        provider: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        base_price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            origin: origin.into(),
            destination: destination.into(),
            base_price,
            discount_percent: None,
            duration: "0m".to_string(),
            departure_time: String::new(),
            transport_mode: TransportMode::Bus,
            rating: 0.0,
            amenities: Vec::new(),
            verified: false,
            featured: false,
        }
    }

    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_departure(mut self, departure_time: impl Into<String>) -> Self {
        self.departure_time = departure_time.into();
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Base price after the discount, if any
    pub fn effective_price(&self) -> Price {
        match self.discount_percent {
            Some(percent) if percent > 0 => self.base_price.discounted(percent),
            _ => self.base_price,
        }
    }

    pub fn travel_duration(&self) -> Result<TravelDuration, DurationParseError> {
        TravelDuration::parse(&self.duration)
    }

    pub fn route_label(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_with_discount() {
        let fare = FareRecord::new("2", "GUO Transport", "Enugu", "Nsukka", Price::from_major(1500))
            .with_discount(10);
        assert_eq!(fare.effective_price(), Price::from_major(1350));
        assert_eq!(fare.effective_price().as_decimal(), 1350.00);
    }

    #[test]
    fn test_effective_price_rounds_to_two_decimals() {
        let fare = FareRecord::new("6", "Ifesinachi Transport", "Enugu", "Abakaliki", Price::from_major(1150))
            .with_discount(15);
        assert_eq!(fare.effective_price(), Price::from_minor(97750));

        // 3% off 0.99 is 0.9603, rounded to 0.96
        assert_eq!(Price::from_minor(99).discounted(3), Price::from_minor(96));
        // 50% off 0.05 is 0.025, rounded half up to 0.03
        assert_eq!(Price::from_minor(5).discounted(50), Price::from_minor(3));
    }

    #[test]
    fn test_effective_price_without_discount() {
        let fare = FareRecord::new("1", "Peace Mass Transit", "Enugu", "Nsukka", Price::from_major(1500));
        assert_eq!(fare.effective_price(), Price::from_major(1500));
        assert_eq!(fare.clone().with_discount(0).effective_price(), Price::from_major(1500));
        assert_eq!(fare.with_discount(100).effective_price(), Price::ZERO);
    }

    #[test]
    fn test_discount_on_very_large_prices() {
        let half = Price::from_minor(i64::MAX / 2);
        assert_eq!(half.discounted(10), Price::from_minor(4_150_517_416_584_649_113));
        assert_eq!(Price::MAX.discounted(0), Price::MAX);
        assert!(Price::MAX.discounted(10) < Price::MAX);
        assert_eq!(Price::MAX.discounted(100), Price::ZERO);
    }

    #[test]
    fn test_transport_mode_parsing() {
        assert_eq!("Ferry".parse::<TransportMode>().unwrap(), TransportMode::Ferry);
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_fare_deserialization() {
        let json = r#"
            {
                "id": "7",
                "provider": "Peace Mass Transit",
                "origin": "Enugu",
                "destination": "Udi",
                "base_price": 60000,
                "discount_percent": null,
                "duration": "45m",
                "departure_time": "08:00 AM",
                "transport_mode": "bus",
                "rating": 3.9
            }
        "#;
        let fare: FareRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(fare.base_price, Price::from_major(600));
        assert_eq!(fare.travel_duration().unwrap().minutes(), 45);
        assert!(fare.amenities.is_empty());
        assert!(!fare.verified);
    }
}
