//! API middleware.

mod auth;
mod loopback;
mod rate_limit;

pub use auth::{auth_middleware, bearer_token};
pub use loopback::loopback_middleware;
pub use rate_limit::rate_limit_login_middleware;
