//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_LOG_DIR, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SMTP_HOST,
    DEFAULT_SMTP_PORT, DEV_SECRET_KEY,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    secret_key: String,
    pub auth_user: Option<String>,
    auth_pass: Option<String>,
    pub email_user: String,
    email_pass: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    asana_token: Option<String>,
    pub asana_project_id: Option<String>,
    pub log_dir: PathBuf,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"[REDACTED]")
            .field("auth_user", &self.auth_user)
            .field("auth_pass", &"[REDACTED]")
            .field("email_user", &self.email_user)
            .field("email_pass", &"[REDACTED]")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("asana_token", &"[REDACTED]")
            .field("asana_project_id", &self.asana_project_id)
            .field("log_dir", &self.log_dir)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    /// Fails when SECRET_KEY is unset in a release build.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let secret_key = match non_empty_var("SECRET_KEY") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using insecure default for development");
                DEV_SECRET_KEY.to_string()
            }
            None => {
                return Err(AppError::internal(
                    "SECRET_KEY environment variable must be set in production",
                ))
            }
        };

        Ok(Self {
            secret_key,
            auth_user: non_empty_var("AUTH_USER"),
            auth_pass: non_empty_var("AUTH_PASS"),
            email_user: env::var("EMAIL_USER").unwrap_or_default(),
            email_pass: env::var("EMAIL_PASS").unwrap_or_default(),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            asana_token: non_empty_var("ASANA_TOKEN"),
            asana_project_id: non_empty_var("ASANA_PROJECT_ID"),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR)),
            server_host: env::var("HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }

    /// Build a configuration with the given signing secret and defaults
    /// everywhere else. Credentials and integrations start unset.
    pub fn with_secret(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            auth_user: None,
            auth_pass: None,
            email_user: String::new(),
            email_pass: String::new(),
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            asana_token: None,
            asana_project_id: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Set the login credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.auth_user = Some(user.into());
        self.auth_pass = Some(pass.into());
        self
    }

    /// Get secret bytes for token signing/verification.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Configured login password, if any.
    pub fn auth_pass(&self) -> Option<&str> {
        self.auth_pass.as_deref()
    }

    /// SMTP password.
    pub fn email_pass(&self) -> &str {
        &self.email_pass
    }

    /// Asana personal access token, if any.
    pub fn asana_token(&self) -> Option<&str> {
        self.asana_token.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::with_secret("super-secret").with_credentials("admin", "hunter2");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("admin"));
    }

    #[test]
    fn test_server_addr() {
        let mut config = Config::with_secret("s");
        config.server_host = "127.0.0.1".to_string();
        config.server_port = 8080;
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
