//! Session token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SESSION_TOKEN_LIFETIME_HOURS;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub session: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for a session opened at `issued_at`.
    pub fn new_session(issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::hours(SESSION_TOKEN_LIFETIME_HOURS);
        Self {
            session: true,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

/// Token response returned after successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_expires_after_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = Claims::new_session(now);

        assert!(claims.session);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }
}
