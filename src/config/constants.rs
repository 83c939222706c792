//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Session token lifetime in hours
pub const SESSION_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Signing secret used by debug builds when SECRET_KEY is not set
pub const DEV_SECRET_KEY: &str = "dev-secret-key-not-for-production";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Rate Limiting
// =============================================================================

/// Login attempts allowed per client and window
pub const RATE_LIMIT_LOGIN_REQUESTS: u64 = 20;

/// Login rate limit window in seconds (1 minute)
pub const RATE_LIMIT_LOGIN_WINDOW_SECONDS: u64 = 60;

/// Limiter entries kept before stale windows are pruned
pub const RATE_LIMIT_PRUNE_THRESHOLD: usize = 1024;

// =============================================================================
// Mail
// =============================================================================

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.office365.com";

/// Default SMTP submission port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;

// =============================================================================
// Task tracker
// =============================================================================

/// Asana task creation endpoint
pub const ASANA_TASKS_URL: &str = "https://app.asana.com/api/1.0/tasks";

// =============================================================================
// Daily log files
// =============================================================================

/// Default directory for daily log files
pub const DEFAULT_LOG_DIR: &str = "log";

/// Maximum number of daily log files kept on disk
pub const MAX_LOG_FILES: usize = 170;

/// Time zone used for log file names and timestamps
pub const LOG_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Zurich;

/// Extension of daily log files
pub const LOG_FILE_EXTENSION: &str = "log";
