use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use farewise_core::{DisplayCurrency, Role, SessionContext};

use crate::{error::AppError, state::AppState};

/// Dashboard the caller is viewing: `user`, `company` or `admin`
pub const ROLE_HEADER: &str = "x-farewise-role";
/// Display currency override: `NGN`, `USD`, `EUR` or `GBP`
pub const CURRENCY_HEADER: &str = "x-farewise-currency";

// ============================================================================
// Session Context Middleware
// ============================================================================

/// Build the per-request [`SessionContext`] and hand it to handlers through
/// request extensions. Selects a view only; nothing here authenticates.
pub async fn session_context_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_headers(req.headers(), state.display.currency)?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map_err(|_| AppError::ValidationError(format!("{} header is not valid text", name)))
        })
        .transpose()
}

fn session_from_headers(headers: &HeaderMap, default_currency: DisplayCurrency) -> Result<SessionContext, AppError> {
    let role = match header_value(headers, ROLE_HEADER)? {
        Some(value) => value.parse::<Role>()?,
        None => Role::default(),
    };
    let currency = match header_value(headers, CURRENCY_HEADER)? {
        Some(value) => value.parse::<DisplayCurrency>()?,
        None => default_currency,
    };

    Ok(SessionContext::new(role, currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_defaults_without_headers() {
        let session = session_from_headers(&HeaderMap::new(), DisplayCurrency::Gbp).unwrap();
        assert_eq!(session.role, Role::User);
        assert_eq!(session.currency, DisplayCurrency::Gbp);
    }

    #[test]
    fn test_reads_role_and_currency() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Company"));
        headers.insert(CURRENCY_HEADER, HeaderValue::from_static("usd"));
        let session = session_from_headers(&headers, DisplayCurrency::Ngn).unwrap();
        assert_eq!(session.role, Role::Company);
        assert_eq!(session.currency, DisplayCurrency::Usd);
    }

    #[test]
    fn test_rejects_unknown_role() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("superuser"));
        assert!(matches!(
            session_from_headers(&headers, DisplayCurrency::Ngn),
            Err(AppError::ValidationError(_))
        ));
    }
}
