//! Token-bucket rate limiting for outbound requests.
//!
//! Huntress documents a ceiling of 60 requests per minute per key. One
//! [`RateLimiter`] is shared by every clone of a client, so concurrent calls
//! draw from the same bucket.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::context::Context;
use crate::error::{HuntressError, Result};

/// Documented vendor ceiling.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

/// Rate limit settings for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per minute. Zero disables limiting.
    pub requests_per_minute: u32,
    /// Burst capacity. Defaults to a tenth of the per-minute rate (at least 1).
    pub burst: Option<u32>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            burst: None,
        }
    }
}

impl RateLimitConfig {
    /// Limit to `requests_per_minute` with the default burst.
    #[must_use]
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            burst: None,
        }
    }

    /// No limiting at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self::per_minute(0)
    }

    /// Build the limiter, or `None` when limiting is disabled.
    pub(crate) fn build(&self) -> Option<RateLimiter> {
        if self.requests_per_minute == 0 {
            return None;
        }
        let burst = self
            .burst
            .unwrap_or(self.requests_per_minute / 10)
            .max(1);
        Some(RateLimiter::new(
            burst,
            f64::from(self.requests_per_minute) / 60.0,
        ))
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    capacity: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;
    }

    /// Take one token, or report how long until one is available.
    fn try_take(&mut self, now: Instant) -> core::result::Result<(), Duration> {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return Ok(());
        }
        let deficit = 1.0 - self.tokens;
        Err(Duration::try_from_secs_f64(deficit / self.refill_per_sec).unwrap_or(Duration::MAX))
    }
}

/// Continuous-refill token bucket.
///
/// Starts full. Tokens refill at `refill_per_sec` up to `capacity`; each
/// granted request consumes one.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Create a bucket holding at most `capacity` tokens, refilled at
    /// `refill_per_sec` tokens per second.
    pub fn new(capacity: u32, refill_per_sec: f64) -> Self {
        let capacity = f64::from(capacity.max(1));
        let refill_per_sec = if refill_per_sec.is_finite() && refill_per_sec > 0.0 {
            refill_per_sec
        } else {
            f64::MIN_POSITIVE
        };
        Self {
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                capacity,
                refill_per_sec,
                last_refill: Instant::now(),
            }),
        }
    }

    /// A limiter for `requests_per_minute` with the default burst.
    ///
    /// Zero yields a bucket of one token that never refills.
    pub fn per_minute(requests_per_minute: u32) -> Self {
        RateLimitConfig::per_minute(requests_per_minute)
            .build()
            .unwrap_or_else(|| Self::new(1, 0.0))
    }

    /// Take a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        self.bucket.lock().try_take(Instant::now()).is_ok()
    }

    /// Tokens currently available, after refill.
    pub fn available(&self) -> f64 {
        let mut bucket = self.bucket.lock();
        bucket.refill(Instant::now());
        bucket.tokens
    }

    /// Wait until a token is available and take it.
    ///
    /// Returns [`HuntressError::Cancelled`] if `ctx` ends first; in that case
    /// no token is consumed.
    pub async fn wait(&self, ctx: &Context) -> Result<()> {
        loop {
            ctx.check()?;

            let delay = match self.bucket.lock().try_take(Instant::now()) {
                Ok(()) => return Ok(()),
                Err(delay) => delay,
            };

            tokio::select! {
                biased;
                reason = ctx.done() => return Err(HuntressError::Cancelled(reason)),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
