//! Exponential backoff retry with jitter.
//!
//! The [`Retrier`] re-invokes one HTTP round trip while it fails with a
//! transport error or a retryable status. Cancellation of the call's
//! [`Context`] always wins over a pending attempt or backoff sleep.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::context::Context;
use crate::error::{HuntressError, Result};
use crate::logger::{Logger, NoopLogger};

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Extra tries after the first; `3` allows up to four calls.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Statuses that trigger a retry.
    pub retryable_status_codes: BTreeSet<u16>,
    /// Fraction (0.0 to 1.0) of each delay that is randomized away.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            retryable_status_codes: [429, 500, 502, 503, 504].into_iter().collect(),
            jitter: 0.25,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_delays(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn with_retryable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    /// Non-finite values disable jitter; others are clamped to `[0, 1]`.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = unit_interval(jitter);
        self
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Un-jittered delay before retry number `retry` (0-based):
    /// `min(max_delay, base_delay * 2^retry)`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let multiplier = 2_u32.saturating_pow(retry.min(31));
        self.base_delay
            .checked_mul(multiplier)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Delay with jitter applied, given a uniform sample in `[0, 1)`.
    ///
    /// The result lies in `[backoff * (1 - jitter), backoff]`, so it never
    /// exceeds `max_delay`.
    pub fn jittered(&self, retry: u32, sample: f64) -> Duration {
        let jitter = unit_interval(self.jitter);
        let sample = unit_interval(sample);
        self.backoff(retry).mul_f64(1.0 - jitter * sample)
    }

    /// Delay before retry number `retry`, honoring a server `Retry-After`.
    fn delay_for(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(hint) => hint.min(self.max_delay),
            None => self.jittered(retry, rand::rng().random::<f64>()),
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN and infinities to zero.
fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One attempt's result, as seen by the retrier.
pub trait AttemptOutcome: Send {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Server-provided retry hint.
    fn retry_after(&self) -> Option<Duration> {
        None
    }

    /// Release the response body. Called once for every attempt that is retried.
    fn discard(self);
}

impl AttemptOutcome for reqwest::Response {
    fn status(&self) -> u16 {
        self.status().as_u16()
    }

    fn retry_after(&self) -> Option<Duration> {
        self.headers()
            .get(reqwest::header::RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    fn discard(self) {
        drop(self);
    }
}

/// Bookkeeping for one logical call.
#[derive(Debug, Clone, Default)]
pub struct AttemptState {
    /// Attempts started so far (1-based once running).
    pub attempt_number: u32,
    /// Total time spent in backoff.
    pub elapsed_backoff: Duration,
    /// Description of the last retried failure.
    pub last_outcome: Option<String>,
}

/// Runs attempts under a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Retrier {
    policy: Arc<RetryPolicy>,
    logger: Arc<dyn Logger>,
}

impl Retrier {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            logger: Arc::new(NoopLogger),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke `attempt` until it succeeds, fails terminally, exhausts the
    /// policy, or `ctx` ends.
    ///
    /// On exhaustion the last outcome is returned unchanged, whether that is
    /// a retryable response or a transport error. Every response that gets
    /// retried is discarded before the next attempt starts.
    pub async fn run<R, F, Fut>(&self, ctx: &Context, mut attempt: F) -> Result<R>
    where
        R: AttemptOutcome,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let mut state = AttemptState::default();

        loop {
            ctx.check()?;
            state.attempt_number += 1;

            let outcome = tokio::select! {
                biased;
                reason = ctx.done() => return Err(HuntressError::Cancelled(reason)),
                outcome = attempt() => outcome,
            };

            let (retry_after, description) = match &outcome {
                Ok(response) if !self.policy.is_retryable_status(response.status()) => {
                    return outcome;
                }
                Ok(response) => (response.retry_after(), format!("HTTP {}", response.status())),
                Err(err) if err.is_cancelled() => return outcome,
                Err(err) => (None, err.to_string()),
            };

            let retry = state.attempt_number - 1;
            if retry >= self.policy.max_attempts {
                self.logger.warn(&format!(
                    "giving up after {} attempts ({:?} in backoff): {description}",
                    state.attempt_number, state.elapsed_backoff
                ));
                return outcome;
            }

            if let Ok(response) = outcome {
                response.discard();
            }

            let delay = self.policy.delay_for(retry, retry_after);
            state.elapsed_backoff += delay;
            self.logger.debug(&format!(
                "attempt {} failed ({description}), retrying in {delay:?}",
                state.attempt_number
            ));
            state.last_outcome = Some(description);

            tokio::select! {
                biased;
                reason = ctx.done() => return Err(HuntressError::Cancelled(reason)),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
