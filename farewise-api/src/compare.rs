use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use farewise_core::SessionContext;
use farewise_listing::compare::{self, CompanySelection, CompanySeries};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;
use crate::views::{chart_rows, history_rows, HistoryPoint};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/compare/companies", post(route_companies))
        .route("/v1/compare", post(compare_companies))
        .route("/v1/routes/{code}/history", get(route_history))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct RouteCompaniesResponse {
    pub companies: Vec<String>,
    pub max_selectable: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub companies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub title: String,
    pub description: String,
    pub series: Vec<CompanySeries>,
    pub rows: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct RouteHistoryResponse {
    pub route_code: String,
    pub points: Vec<HistoryPoint>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/compare/companies
/// Companies that can be picked for a route
pub async fn route_companies(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteCompaniesResponse>, AppError> {
    let companies = compare::route_companies(state.store.fares(), &req.origin, &req.destination)?;
    let message = if companies.is_empty() {
        format!("No companies found for {} to {}", req.origin.trim(), req.destination.trim())
    } else {
        format!("Found {} companies for this route", companies.len())
    };
    Ok(Json(RouteCompaniesResponse {
        companies,
        max_selectable: state.comparison.max_companies,
        message,
    }))
}

/// POST /v1/compare
pub async fn compare_companies(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let config = &state.comparison;
    let selection = CompanySelection::with_companies(config.max_companies, req.companies)?;
    let comparison = compare::compare(
        state.store.fares(),
        &req.origin,
        &req.destination,
        &selection,
        config,
    )?;

    Ok(Json(CompareResponse {
        title: format!("{}-Day Price Comparison", config.history_days),
        description: format!(
            "Comparing prices from {} to {}",
            comparison.origin.trim(),
            comparison.destination.trim()
        ),
        rows: chart_rows(&comparison),
        series: comparison.series,
    }))
}

/// GET /v1/routes/{code}/history
pub async fn route_history(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(code): Path<String>,
) -> Result<Json<RouteHistoryResponse>, AppError> {
    let history = state
        .store
        .price_history(&code)
        .ok_or_else(|| AppError::NotFoundError(format!("No price history for route {}", code)))?;
    Ok(Json(RouteHistoryResponse {
        route_code: code.trim().to_ascii_uppercase(),
        points: history_rows(history, session.currency),
    }))
}
