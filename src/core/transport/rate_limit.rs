//! Per-client request limiter for the network transport.
//!
//! Each key keeps the timestamps of its admitted requests. A check first
//! drops timestamps older than the window, then admits while the remaining
//! count is below the quota.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::core::config::RateLimitConfig;

/// Sliding-window limiter keyed by client address.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for `key` now.
    ///
    /// Returns the number of seconds to wait when the quota is exhausted.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    /// Record a request for `key` at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());

        let timestamps = requests.entry(key.to_string()).or_default();
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() < self.max_requests {
            timestamps.push_back(now);
            return Ok(());
        }

        let retry_after = timestamps
            .front()
            .map(|&oldest| (oldest + self.window).saturating_duration_since(now).as_secs() + 1)
            .unwrap_or(1);
        Err(retry_after)
    }

    /// Drop keys with no request inside the window.
    pub fn prune(&self) {
        let now = Instant::now();
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        requests.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|&last| now.saturating_duration_since(last) < self.window)
        });
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
