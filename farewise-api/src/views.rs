use farewise_catalog::{ProviderDirectory, Review};
use farewise_core::{DisplayCurrency, FareRecord, Price, SessionContext, TransportMode};
use farewise_listing::Comparison;
use serde::Serialize;
use serde_json::{Map, Value};

// ============================================================================
// Fare cards
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceView {
    pub amount: f64,
    pub display: String,
}

impl PriceView {
    pub fn new(price: Price, currency: DisplayCurrency) -> Self {
        Self {
            amount: price.as_decimal(),
            display: currency.format(price),
        }
    }
}

/// Five-star breakdown of a rating
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, 5.0);
        let full = rating.floor() as u8;
        let half = full < 5 && rating - f64::from(full) >= 0.5;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    ReportIssue,
    BookNow,
    ViewReviews,
    ManageFare,
    ModerateReports,
}

fn actions_for(session: &SessionContext) -> Vec<CardAction> {
    let mut actions = vec![CardAction::ViewReviews, CardAction::ReportIssue, CardAction::BookNow];
    if session.can_manage_fares() {
        actions.push(CardAction::ManageFare);
    }
    if session.can_moderate_reports() {
        actions.push(CardAction::ModerateReports);
    }
    actions
}

#[derive(Debug, Clone, Serialize)]
pub struct FareCardView {
    pub id: String,
    pub provider: String,
    pub provider_id: String,
    pub route: String,
    pub origin: String,
    pub destination: String,
    pub transport_mode: TransportMode,
    pub departure_time: String,
    pub duration: String,
    pub price: PriceView,
    /// Undiscounted price, shown struck through when a discount applies
    pub original_price: Option<PriceView>,
    pub discount_label: Option<String>,
    pub rating: f64,
    pub stars: StarRating,
    pub amenities: Vec<String>,
    pub verified: bool,
    pub featured: bool,
    pub actions: Vec<CardAction>,
}

impl FareCardView {
    pub fn render(fare: &FareRecord, providers: &ProviderDirectory, session: &SessionContext) -> Self {
        let discount = fare.discount_percent.filter(|d| *d > 0);
        Self {
            id: fare.id.clone(),
            provider: fare.provider.clone(),
            provider_id: providers.resolve(&fare.provider),
            route: fare.route_label(),
            origin: fare.origin.clone(),
            destination: fare.destination.clone(),
            transport_mode: fare.transport_mode,
            departure_time: fare.departure_time.clone(),
            duration: fare.duration.clone(),
            price: PriceView::new(fare.effective_price(), session.currency),
            original_price: discount.map(|_| PriceView::new(fare.base_price, session.currency)),
            discount_label: discount.map(|d| format!("{}% OFF", d)),
            rating: fare.rating,
            stars: StarRating::from_rating(fare.rating),
            amenities: fare.amenities.clone(),
            verified: fare.verified,
            featured: fare.featured,
            actions: actions_for(session),
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsView {
    pub fare_id: String,
    pub provider: String,
    pub average_rating: Option<f64>,
    pub count: usize,
    pub reviews: Vec<Review>,
}

impl ReviewsView {
    pub fn new(fare: &FareRecord, reviews: Vec<&Review>) -> Self {
        let count = reviews.len();
        let average_rating = (count > 0).then(|| {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            (f64::from(total) / count as f64 * 10.0).round() / 10.0
        });
        Self {
            fare_id: fare.id.clone(),
            provider: fare.provider.clone(),
            average_rating,
            count,
            reviews: reviews.into_iter().cloned().collect(),
        }
    }
}

// ============================================================================
// Charts
// ============================================================================

/// One row per day, one column per company: `{"name": "Day 1", "GUO Transport": 1290.5}`
pub fn chart_rows(comparison: &Comparison) -> Vec<Value> {
    let days = comparison.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    (0..days)
        .map(|day| {
            let mut row = Map::new();
            row.insert("name".to_string(), Value::from(format!("Day {}", day + 1)));
            for series in &comparison.series {
                if let Some(value) = series.values.get(day) {
                    row.insert(series.company.clone(), Value::from(*value));
                }
            }
            Value::Object(row)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPoint {
    pub name: String,
    pub price: PriceView,
}

pub fn history_rows(history: &[Price], currency: DisplayCurrency) -> Vec<HistoryPoint> {
    history
        .iter()
        .enumerate()
        .map(|(i, price)| HistoryPoint {
            name: format!("Day {}", i + 1),
            price: PriceView::new(*price, currency),
        })
        .collect()
}
