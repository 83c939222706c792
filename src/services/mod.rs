//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod mail_service;

pub use auth_service::{issue_token, AuthService, Authenticator};
pub use mail_service::MailDispatcher;
