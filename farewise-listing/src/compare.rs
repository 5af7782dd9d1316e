use farewise_core::{FareRecord, Price};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::criteria::SearchCriteria;
use crate::predicate::FarePredicate;
use crate::{ListingError, ListingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Most companies that can be compared at once
    pub max_companies: usize,
    /// Fewest companies needed for a comparison
    pub min_companies: usize,
    /// Points per company series
    pub history_days: usize,
    /// Maximum relative deviation from the base fare, e.g. 0.15
    pub variation: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_companies: 3,
            min_companies: 2,
            history_days: 7,
            variation: 0.15,
        }
    }
}

fn route_fares<'a>(
    records: &'a [FareRecord],
    origin: &str,
    destination: &str,
) -> ListingResult<impl Iterator<Item = &'a FareRecord>> {
    if origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(ListingError::ValidationError(
            "Please enter both 'From' and 'To' locations".to_string(),
        ));
    }
    let predicate = SearchCriteria::new(origin, destination).predicate();
    Ok(records.iter().filter(move |f| predicate.matches(f)))
}

/// Companies serving a route, in first-seen order. Both ends are required;
/// an empty result means no company offers the route.
pub fn route_companies(records: &[FareRecord], origin: &str, destination: &str) -> ListingResult<Vec<String>> {
    let mut companies: Vec<String> = Vec::new();
    for fare in route_fares(records, origin, destination)? {
        if !companies.contains(&fare.provider) {
            companies.push(fare.provider.clone());
        }
    }
    Ok(companies)
}

/// Companies picked for comparison, capped at a maximum
#[derive(Debug, Clone)]
pub struct CompanySelection {
    selected: Vec<String>,
    max: usize,
}

impl CompanySelection {
    pub fn new(max: usize) -> Self {
        Self {
            selected: Vec::new(),
            max,
        }
    }

    /// Select every company in `companies`, failing past the cap
    pub fn with_companies<I, S>(max: usize, companies: I) -> ListingResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(max);
        for company in companies {
            let company = company.into();
            if !selection.is_selected(&company) {
                selection.toggle(&company)?;
            }
        }
        Ok(selection)
    }

    /// Flip `company` in or out. Returns whether it is now selected.
    pub fn toggle(&mut self, company: &str) -> ListingResult<bool> {
        if let Some(pos) = self.selected.iter().position(|c| c == company) {
            self.selected.remove(pos);
            return Ok(false);
        }
        if self.selected.len() >= self.max {
            return Err(ListingError::ValidationError(format!(
                "You can compare up to {} companies at once",
                self.max
            )));
        }
        self.selected.push(company.to_string());
        Ok(true)
    }

    pub fn is_selected(&self, company: &str) -> bool {
        self.selected.iter().any(|c| c == company)
    }

    pub fn companies(&self) -> &[String] {
        &self.selected
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanySeries {
    pub company: String,
    pub base_fare: Price,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    pub origin: String,
    pub destination: String,
    pub series: Vec<CompanySeries>,
}

/// Price series for each selected company on a route.
///
/// Each series wanders around the company's base fare by at most
/// `config.variation`. The generator is seeded from the company and route,
/// so the same comparison always draws the same values.
pub fn compare(
    records: &[FareRecord],
    origin: &str,
    destination: &str,
    selection: &CompanySelection,
    config: &ComparisonConfig,
) -> ListingResult<Comparison> {
    if selection.companies().len() < config.min_companies {
        return Err(ListingError::ValidationError(format!(
            "Please select at least {} companies to compare",
            config.min_companies
        )));
    }

    let fares: Vec<&FareRecord> = route_fares(records, origin, destination)?.collect();
    let mut series = Vec::with_capacity(selection.companies().len());

    for company in selection.companies() {
        let fare = fares
            .iter()
            .find(|f| &f.provider == company)
            .ok_or_else(|| {
                ListingError::ValidationError(format!(
                    "{} does not serve {} to {}",
                    company, origin, destination
                ))
            })?;

        let base = fare.base_price.as_decimal();
        let mut rng = StdRng::seed_from_u64(series_seed(company, origin, destination));
        let values = (0..config.history_days)
            .map(|_| {
                let deviation = if config.variation > 0.0 {
                    rng.gen_range(-config.variation..=config.variation)
                } else {
                    0.0
                };
                round_cents(base * (1.0 + deviation))
            })
            .collect();

        series.push(CompanySeries {
            company: company.clone(),
            base_fare: fare.base_price,
            values,
        });
    }

    info!(
        "Comparing prices for {} companies from {} to {}",
        series.len(),
        origin,
        destination
    );

    Ok(Comparison {
        origin: origin.to_string(),
        destination: destination.to_string(),
        series,
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// FNV-1a over the normalized inputs
fn series_seed(company: &str, origin: &str, destination: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in [company, origin, destination] {
        for byte in part.trim().to_lowercase().bytes().chain(std::iter::once(0)) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
    }
    hash
}
