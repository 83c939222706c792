//! Infrastructure layer - File logging, rate limiting and outbound services.

pub mod daily_log;
pub mod rate_limiter;
pub mod smtp;
pub mod task_tracker;

pub use daily_log::{DailyLogger, LogLevel};
pub use rate_limiter::{FixedWindowLimiter, RateLimitDecision};
pub use smtp::{MailError, Mailer, SmtpMailer};
pub use task_tracker::{AsanaTracker, TaskTracker, TaskTrackerError};
