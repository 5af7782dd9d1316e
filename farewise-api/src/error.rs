use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use farewise_catalog::CatalogError;
use farewise_core::CoreError;
use farewise_listing::ListingError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg),
            CoreError::DurationError(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::ValidationError(msg) => AppError::ValidationError(msg),
            ListingError::Superseded { generation } => AppError::ConflictError(format!(
                "Search {} was superseded by a newer search",
                generation
            )),
            ListingError::Core(e) => e.into(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation: AppError = ListingError::ValidationError("bad range".into()).into();
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let superseded: AppError = ListingError::Superseded { generation: 3 }.into();
        assert_eq!(superseded.into_response().status(), StatusCode::CONFLICT);

        let missing: AppError = CoreError::NotFound("fare 42".into()).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let catalog: AppError = CatalogError::DuplicateFareId("1".into()).into();
        assert_eq!(catalog.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
