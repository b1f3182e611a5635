//! Per-user rate limiting
//!
//! Button presses and LLM-classified messages each have their own limiter,
//! since a Gemini round trip is far more expensive than a button press.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};
use std::time::{Duration, Instant};

use crate::constants::{LLM_RATE_LIMIT_SECONDS, RATE_LIMIT_SECONDS};

/// Thread-safe rate limiter keyed by Telegram user id
pub struct RateLimiter {
    last_seen: RwLock<HashMap<u64, Instant>>,
    interval: Duration,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            last_seen: RwLock::new(HashMap::new()),
            interval,
        }
    }

    /// Returns `true` if the user can proceed, recording the attempt
    pub fn check(&self, user_id: u64) -> bool {
        self.check_at(user_id, Instant::now())
    }

    fn check_at(&self, user_id: u64, now: Instant) -> bool {
        {
            let last = self.last_seen.read().unwrap_or_else(|e| e.into_inner());
            if let Some(&seen) = last.get(&user_id) {
                if now.saturating_duration_since(seen) < self.interval {
                    return false;
                }
            }
        }

        let mut last = self.last_seen.write().unwrap_or_else(|e| e.into_inner());
        last.insert(user_id, now);
        // Entries older than the interval carry no information
        if last.len() > 1024 {
            let interval = self.interval;
            last.retain(|_, seen| now.saturating_duration_since(*seen) < interval);
        }
        true
    }
}

static CALLBACK_LIMITER: OnceLock<RateLimiter> = OnceLock::new();
static LLM_LIMITER: OnceLock<RateLimiter> = OnceLock::new();

/// Limiter for inline keyboard presses
pub fn check_callback(user_id: u64) -> bool {
    CALLBACK_LIMITER
        .get_or_init(|| RateLimiter::new(Duration::from_secs(RATE_LIMIT_SECONDS)))
        .check(user_id)
}

/// Limiter for messages that need a Gemini call
pub fn check_llm(user_id: u64) -> bool {
    LLM_LIMITER
        .get_or_init(|| RateLimiter::new(Duration::from_secs(LLM_RATE_LIMIT_SECONDS)))
        .check(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter() {
        let limiter = RateLimiter::new(Duration::from_secs(3));
        let start = Instant::now();

        assert!(limiter.check_at(123, start));
        assert!(!limiter.check_at(123, start + Duration::from_secs(1)));
        // Different user should pass
        assert!(limiter.check_at(456, start));
        assert!(limiter.check_at(123, start + Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_interval_never_limits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        assert!(limiter.check(1));
        assert!(limiter.check(1));
    }
}
