//! Domain layer - Core notification concepts
//!
//! Request validation and session claims, independent of HTTP and
//! infrastructure concerns.

pub mod notification;
pub mod session;

pub use notification::{is_valid_email, Notification, NotificationAccepted, NotificationRequest};
pub use session::{Claims, TokenResponse};
