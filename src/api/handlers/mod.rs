//! HTTP request handlers.

pub mod auth_handler;
pub mod notifier_handler;

pub use auth_handler::auth_routes;
pub use notifier_handler::notifier_routes;
