//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::{Config, RATE_LIMIT_LOGIN_REQUESTS, RATE_LIMIT_LOGIN_WINDOW_SECONDS};
use crate::infra::{AsanaTracker, DailyLogger, FixedWindowLimiter, Mailer, SmtpMailer, TaskTracker};
use crate::services::{AuthService, Authenticator, MailDispatcher};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Mail dispatcher
    pub dispatcher: MailDispatcher,
    /// Login rate limiter
    pub login_limiter: Arc<FixedWindowLimiter>,
    /// Daily file logger
    pub logger: DailyLogger,
}

impl AppState {
    /// Create application state from config, wiring the real SMTP and Asana
    /// collaborators.
    pub fn from_config(config: Config, logger: DailyLogger) -> Self {
        let mailer = Arc::new(SmtpMailer::from_config(&config));
        let tracker = Arc::new(AsanaTracker::from_config(&config));
        Self::with_collaborators(config, logger, mailer, tracker)
    }

    /// Create application state with injected mail and tracker collaborators.
    pub fn with_collaborators(
        config: Config,
        logger: DailyLogger,
        mailer: Arc<dyn Mailer>,
        tracker: Arc<dyn TaskTracker>,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            dispatcher: MailDispatcher::new(mailer, tracker, logger.clone()),
            login_limiter: Arc::new(FixedWindowLimiter::new(
                RATE_LIMIT_LOGIN_REQUESTS,
                RATE_LIMIT_LOGIN_WINDOW_SECONDS,
            )),
            logger,
        }
    }
}
