use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use farewise_core::intents::{
    Acknowledgement, BookingForm, FareReport, IntentKind, IssueReport, ReviewSubmission,
};
use farewise_core::FareRecord;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;
use crate::views::ReviewsView;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/fares/{id}/reports", post(report_issue))
        .route("/v1/fares/{id}/reviews", get(list_reviews).post(submit_review))
        .route("/v1/fares/{id}/bookings", post(book_fare))
        .route("/v1/reports", post(submit_report))
}

type Accepted = (StatusCode, Json<Acknowledgement>);

fn find_fare<'a>(state: &'a AppState, id: &str) -> Result<&'a FareRecord, AppError> {
    state
        .store
        .get(id)
        .ok_or_else(|| AppError::NotFoundError(format!("Fare {} not found", id)))
}

fn accepted(intent: IntentKind, fare_id: Option<String>) -> Accepted {
    (StatusCode::ACCEPTED, Json(Acknowledgement::new(intent, fare_id)))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/fares/{id}/reports
pub async fn report_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<IssueReport>,
) -> Result<Accepted, AppError> {
    let fare = find_fare(&state, &id)?;
    let issue_type = req.validate()?;
    info!("Issue reported for fare {} ({}): {:?}", fare.id, fare.provider, issue_type);
    Ok(accepted(IntentKind::ReportIssue, Some(fare.id.clone())))
}

/// GET /v1/fares/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewsView>, AppError> {
    let fare = find_fare(&state, &id)?;
    Ok(Json(ReviewsView::new(fare, state.store.reviews_for(&fare.id))))
}

/// POST /v1/fares/{id}/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewSubmission>,
) -> Result<Accepted, AppError> {
    let fare = find_fare(&state, &id)?;
    req.validate()?;
    info!("Review submitted for fare {}: {} stars", fare.id, req.rating);
    Ok(accepted(IntentKind::SubmitReview, Some(fare.id.clone())))
}

/// POST /v1/fares/{id}/bookings
pub async fn book_fare(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BookingForm>,
) -> Result<Accepted, AppError> {
    let fare = find_fare(&state, &id)?;
    req.validate()?;
    info!(
        "Booking requested for fare {} ({}): {} seat(s)",
        fare.id,
        fare.route_label(),
        req.seats
    );
    Ok(accepted(IntentKind::BookNow, Some(fare.id.clone())))
}

/// POST /v1/reports
/// Standalone report form, not tied to a listed fare
pub async fn submit_report(Json(req): Json<FareReport>) -> Result<Accepted, AppError> {
    req.validate()?;
    info!("Fare report submitted for {} on {}", req.company.trim(), req.route.trim());
    Ok(accepted(IntentKind::SubmitReport, None))
}
