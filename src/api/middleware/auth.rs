//! Session token middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::errors::AppError;

/// Token segment of an authorization header value (`<scheme> <token>`).
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|t| !t.is_empty())
}

/// Session token middleware.
///
/// A missing Authorization header is a 401; anything present but not a
/// valid, unexpired session token is a 403. Verified claims are injected
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(auth_header) = request.headers().get(AUTHORIZATION) else {
        state.logger.warning("Rejected request without token");
        return Err(AppError::Unauthorized);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(AppError::Forbidden);

    let claims = match token.and_then(|t| state.auth_service.verify_token(t)) {
        Ok(claims) => claims,
        Err(e) => {
            state.logger.warning("Rejected invalid or expired token");
            return Err(e);
        }
    };

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Token xyz"), Some("xyz"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token(""), None);
    }
}
