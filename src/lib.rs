//! Notifier gateway - authenticated HTML email notifications over HTTP
//!
//! A loopback-only HTTP service: `POST /login` exchanges configured
//! credentials for a 24 hour session token, `POST /notifier` validates a
//! notification, mirrors it into a task tracker and emails it to every
//! recipient in one message. Operational events land in daily log files.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Notification and session types, recipient validation
//! - **services**: Authentication and mail dispatch
//! - **infra**: Daily file logger, rate limiter, SMTP and task tracker clients
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server on PORT (default 3000)
//! cargo run -- serve
//!
//! # Override bind address and log directory
//! cargo run -- --log-dir /var/log/notifier serve --host 127.0.0.1 --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use infra::DailyLogger;
