use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use farewise_catalog::Destination;
use farewise_core::{Price, SessionContext, TransportMode};
use farewise_listing::{FilterCriteria, ListingRequest, SearchCriteria, SortDirection, SortKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::views::FareCardView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/fares/search", post(search_fares))
        .route("/v1/fares/{id}", get(get_fare))
        .route("/v1/destinations", get(suggest_destinations))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct SearchFaresRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub travel_date: Option<NaiveDate>,
    #[serde(default)]
    pub filter: FilterRequest,
    pub sort_key: Option<String>,
    pub sort_direction: Option<String>,
}

/// Filter panel state. Prices are major units as typed into the panel.
#[derive(Debug, Deserialize, Default)]
pub struct FilterRequest {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Omitted means every mode; an empty list matches nothing
    pub transport_modes: Option<Vec<TransportMode>>,
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub direct_only: bool,
}

impl FilterRequest {
    fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        let bound = |value: Option<f64>, default: Price, name: &str| -> Result<Price, AppError> {
            match value {
                Some(v) if !v.is_finite() => {
                    Err(AppError::ValidationError(format!("{} must be a number", name)))
                }
                Some(v) => Ok(Price::from_decimal(v)),
                None => Ok(default),
            }
        };

        let defaults = FilterCriteria::default();
        let mut criteria = FilterCriteria {
            min_price: bound(self.min_price, defaults.min_price, "min_price")?,
            max_price: bound(self.max_price, defaults.max_price, "max_price")?,
            providers: self.providers.into_iter().collect::<BTreeSet<_>>(),
            direct_only: self.direct_only,
            ..defaults
        };
        if let Some(modes) = self.transport_modes {
            criteria.transport_modes = modes.into_iter().collect();
        }
        Ok(criteria)
    }
}

#[derive(Debug, Serialize)]
pub struct ExcludedFareResponse {
    pub fare_id: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct SearchFaresResponse {
    pub fares: Vec<FareCardView>,
    pub excluded: Vec<ExcludedFareResponse>,
    pub total: usize,
    pub no_results: bool,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// Echoed back for display; never used for matching
    pub travel_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/fares/search
/// Match, filter and sort the catalog
pub async fn search_fares(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<SearchFaresRequest>,
) -> Result<Json<SearchFaresResponse>, AppError> {
    let sort_key = match req.sort_key.as_deref() {
        Some(key) => key.parse::<SortKey>()?,
        None => state.listing.default_sort_key,
    };
    let sort_direction = match req.sort_direction.as_deref() {
        Some(dir) => dir.parse::<SortDirection>()?,
        None => state.listing.default_sort_direction,
    };

    let request = ListingRequest {
        search: SearchCriteria::new(req.origin, req.destination),
        filter: req.filter.into_criteria()?,
        sort_key,
        sort_direction,
    };
    debug!("Searching fares: {:?}", request);

    let listing = request.run(&state.store)?;
    info!("Search completed: found {} transport options", listing.len());

    let providers = state.store.providers();
    let fares: Vec<FareCardView> = listing
        .fares
        .iter()
        .map(|fare| FareCardView::render(fare, providers, &session))
        .collect();
    let excluded = listing
        .excluded
        .iter()
        .map(|e| ExcludedFareResponse {
            fare_id: e.fare_id.clone(),
            reason: e.reason.to_string(),
        })
        .collect();

    Ok(Json(SearchFaresResponse {
        total: fares.len(),
        no_results: fares.is_empty(),
        fares,
        excluded,
        sort_key,
        sort_direction,
        travel_date: req.travel_date,
    }))
}

/// GET /v1/fares/{id}
pub async fn get_fare(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<FareCardView>, AppError> {
    let fare = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("Fare {} not found", id)))?;
    Ok(Json(FareCardView::render(fare, state.store.providers(), &session)))
}

/// GET /v1/destinations?q=
pub async fn suggest_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Json<Vec<Destination>> {
    Json(
        state
            .store
            .suggest_destinations(&query.q)
            .into_iter()
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_request_defaults() {
        let criteria = FilterRequest::default().into_criteria().unwrap();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_filter_request_empty_modes_kept_empty() {
        let req = FilterRequest {
            transport_modes: Some(vec![]),
            min_price: Some(500.0),
            ..FilterRequest::default()
        };
        let criteria = req.into_criteria().unwrap();
        assert!(criteria.transport_modes.is_empty());
        assert_eq!(criteria.min_price, Price::from_major(500));
        assert_eq!(criteria.max_price, Price::MAX);
    }

    #[test]
    fn test_filter_request_rejects_nan() {
        let req = FilterRequest {
            max_price: Some(f64::NAN),
            ..FilterRequest::default()
        };
        assert!(matches!(req.into_criteria(), Err(AppError::ValidationError(_))));
    }
}
