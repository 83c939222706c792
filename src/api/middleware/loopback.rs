//! Loopback-only access restriction.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::errors::AppError;

/// Peer address of the connection. Forwarding headers are ignored.
pub(crate) fn peer_ip(request: &Request) -> Option<IpAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_canonical())
}

/// Reject every request whose peer is not the local machine.
pub async fn loopback_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match peer_ip(&request) {
        Some(ip) if ip.is_loopback() => Ok(next.run(request).await),
        Some(ip) => {
            state.logger.warning(format!("Blocked remote IP: {}", ip));
            Err(AppError::AccessDenied)
        }
        None => {
            state.logger.warning("Blocked request without peer address");
            Err(AppError::AccessDenied)
        }
    }
}
