//! In-process fixed-window rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RATE_LIMIT_PRUNE_THRESHOLD;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Requests seen in the current window, including this one
    pub count: u64,
    /// Whether the request is within the limit
    pub allowed: bool,
    /// Seconds until the current window closes
    pub retry_after: u64,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u64,
}

/// Fixed-window counter keyed by client identifier.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u64,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    /// Allow `max_requests` per `window_seconds` for each identifier.
    pub fn new(max_requests: u64, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_seconds),
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Count a request for `identifier` and decide whether it may pass.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        self.check_at(identifier, Instant::now())
    }

    fn check_at(&self, identifier: &str, now: Instant) -> RateLimitDecision {
        // Counters stay valid after a panicking holder.
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() > RATE_LIMIT_PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows
            .entry(identifier.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        let elapsed = now.duration_since(entry.started);
        let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);

        RateLimitDecision {
            count: entry.count,
            allowed: entry.count <= self.max_requests,
            retry_after,
        }
    }
}
