//! Rate limiting middleware for the login endpoint.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::loopback::peer_ip;
use crate::api::AppState;
use crate::errors::AppError;
use crate::infra::RateLimitDecision;

/// Standard `RateLimit-*` headers, sent on passes and rejections alike.
fn insert_rate_limit_headers(headers: &mut HeaderMap, limit: u64, decision: &RateLimitDecision) {
    let remaining = limit.saturating_sub(decision.count);
    headers.insert("RateLimit-Limit", HeaderValue::from(limit));
    headers.insert("RateLimit-Remaining", HeaderValue::from(remaining));
    headers.insert("RateLimit-Reset", HeaderValue::from(decision.retry_after));
}

/// Limits login attempts per client to the limiter's window budget,
/// whatever the credentials.
pub async fn rate_limit_login_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client_id = peer_ip(&request)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let decision = state.login_limiter.check(&client_id);
    let max_requests = state.login_limiter.max_requests();

    if !decision.allowed {
        state.logger.warning(format!(
            "Login rate limit exceeded for {} ({} requests)",
            client_id, decision.count
        ));
        let mut response = AppError::RateLimited {
            retry_after: decision.retry_after,
        }
        .into_response();
        insert_rate_limit_headers(response.headers_mut(), max_requests, &decision);
        return response;
    }

    let mut response = next.run(request).await;
    insert_rate_limit_headers(response.headers_mut(), max_requests, &decision);
    response
}
