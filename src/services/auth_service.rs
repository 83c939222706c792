//! Authentication service - Handles login and session tokens.
//!
//! Credentials come from process configuration; tokens are HS256 JWTs
//! carrying a session flag and a 24 hour expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::Config;
use crate::domain::{Claims, TokenResponse};
use crate::errors::{AppError, AppResult};

/// Authentication service trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a session token
    fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify a session token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Issue a signed token for a new session (shared helper)
pub fn issue_token(claims: &Claims, config: &Config) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret_key_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
}

/// Concrete implementation of AuthService backed by configured credentials.
pub struct Authenticator {
    config: Config,
}

impl Authenticator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn credentials_match(&self, username: &str, password: &str) -> bool {
        match (self.config.auth_user.as_deref(), self.config.auth_pass()) {
            (Some(user), Some(pass)) => username == user && password == pass,
            _ => false,
        }
    }
}

impl AuthService for Authenticator {
    fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        if !self.credentials_match(username, password) {
            return Err(AppError::InvalidCredentials);
        }

        let claims = Claims::new_session(Utc::now());
        let token = issue_token(&claims, &self.config)?;
        Ok(TokenResponse { token })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        // Sessions end exactly at `exp`.
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_key_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Forbidden
        })?;

        if !token_data.claims.session {
            return Err(AppError::Forbidden);
        }

        Ok(token_data.claims)
    }
}
