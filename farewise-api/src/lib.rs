use axum::{http::Method, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod compare;
pub mod error;
pub mod intents;
pub mod middleware;
pub mod search;
pub mod state;
pub mod views;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
            axum::http::HeaderName::from_static(middleware::ROLE_HEADER),
            axum::http::HeaderName::from_static(middleware::CURRENCY_HEADER),
        ]);

    Router::new()
        .route("/health", get(health))
        .merge(search::routes())
        .merge(intents::routes())
        .merge(compare::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_context_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
