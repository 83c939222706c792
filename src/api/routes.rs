//! Application route configuration.

use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{auth_routes, notifier_routes};
use super::middleware::{auth_middleware, loopback_middleware, rate_limit_login_middleware};
use super::AppState;
use crate::errors::AppError;

/// Create the application router with all routes configured.
///
/// Layer order, outermost first: tracing, panic recovery, loopback filter,
/// then the per-route gate (login rate limit or session token).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public login route (rate limited)
        .merge(auth_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_login_middleware,
        )))
        // Protected notification route (requires session token)
        .merge(notifier_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        )))
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            loopback_middleware,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::internal(format!("handler panicked: {}", detail)).into_response()
}
