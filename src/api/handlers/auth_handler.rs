//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::TokenResponse;
use crate::errors::{AppError, AppResult};

const MISSING_CREDENTIALS: &str = "username and password required";

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "username and password required"),
        length(min = 1, message = "username and password required")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "username and password required"),
        length(min = 1, message = "username and password required")
    )]
    pub password: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login with the configured credentials and get a session token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<LoginRequest>, AppError>,
) -> AppResult<Json<TokenResponse>> {
    let ValidatedJson(payload) = payload.map_err(|e| {
        state.logger.warning(format!("Rejected login request: {}", e));
        match e {
            // Unparseable bodies read as missing credentials
            AppError::Validation(_) => AppError::validation(MISSING_CREDENTIALS),
            other => other,
        }
    })?;

    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    match state.auth_service.login(&username, &password) {
        Ok(token) => {
            state.logger.info(format!("Session token issued for user: {}", username));
            Ok(Json(token))
        }
        Err(AppError::InvalidCredentials) => {
            state.logger.warning(format!("Failed login for user: {}", username));
            Err(AppError::InvalidCredentials)
        }
        Err(e) => {
            state.logger.error(format!("/login error: {:?}", e));
            Err(e)
        }
    }
}
