//! Retry policies and bounded polling.
//!
//! The client never retries ordinary requests; a failed fetch waits for the
//! user to try again. The one exception is work the server finishes
//! asynchronously (payment settlement), which is polled with
//! [`poll_until`] under a [`RetryPolicy`].
//!
//! # Example
//!
//! ```rust
//! use gatepass_runtime::retry::{Backoff, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::builder()
//!     .max_attempts(5)
//!     .initial_delay(Duration::from_secs(2))
//!     .max_delay(Duration::from_secs(10))
//!     .backoff(Backoff::Linear)
//!     .build();
//!
//! assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
//! assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
//! assert_eq!(policy.delay_for_attempt(9), Duration::from_secs(10));
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// How the wait between attempts grows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay after every attempt
    Fixed,
    /// `initial_delay * n` after attempt `n`
    Linear,
    /// `initial_delay * multiplier^(n - 1)` after attempt `n`
    Exponential {
        /// Growth factor per attempt
        multiplier: f64,
    },
}

/// Retry policy configuration
///
/// # Default Values
///
/// - `max_attempts`: 5
/// - `initial_delay`: 2 seconds
/// - `max_delay`: 10 seconds
/// - `backoff`: linear
/// - `jitter`: off
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    backoff: Backoff,
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Create a policy with the default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            backoff: Backoff::Linear,
            jitter: false,
        }
    }

    /// Create a new policy builder.
    #[must_use]
    pub const fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder {
            policy: Self::new(),
        }
    }

    /// Maximum number of attempts, including the first
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Base delay the backoff grows from
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Cap on any single delay
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Growth strategy
    #[must_use]
    pub const fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Check if another attempt is allowed after `attempt` attempts
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after attempt `attempt` (1-based) before the next one
    ///
    /// Returns zero for attempt 0: nothing waits before the first attempt.
    /// The result never exceeds `max_delay`. With jitter enabled the delay
    /// is scaled by a random factor in `0.5..=1.0`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base = match self.backoff {
            Backoff::Fixed => self.initial_delay,
            Backoff::Linear => self.initial_delay.saturating_mul(attempt),
            Backoff::Exponential { multiplier } => {
                let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
                let secs = self.initial_delay.as_secs_f64() * multiplier.powi(exponent);
                Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
            },
        };

        let capped = base.min(self.max_delay);

        if self.jitter {
            use rand::Rng;
            let factor = rand::thread_rng().gen_range(0.5..=1.0);
            capped.mul_f64(factor)
        } else {
            capped
        }
    }
}

/// Builder for [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Set maximum number of attempts (including the first).
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub const fn initial_delay(mut self, delay: Duration) -> Self {
        self.policy.initial_delay = delay;
        self
    }

    /// Set the cap on any single delay.
    #[must_use]
    pub const fn max_delay(mut self, delay: Duration) -> Self {
        self.policy.max_delay = delay;
        self
    }

    /// Set the growth strategy.
    #[must_use]
    pub const fn backoff(mut self, backoff: Backoff) -> Self {
        self.policy.backoff = backoff;
        self
    }

    /// Randomise delays to spread out clients polling the same endpoint.
    #[must_use]
    pub const fn jitter(mut self, jitter: bool) -> Self {
        self.policy.jitter = jitter;
        self
    }

    /// Build the [`RetryPolicy`].
    #[must_use]
    pub const fn build(self) -> RetryPolicy {
        self.policy
    }
}

/// Result of [`poll_until`]
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T, E> {
    /// The check produced a value
    Resolved {
        /// What the check returned
        value: T,
        /// Attempts made, including the resolving one
        attempts: u32,
    },
    /// Every attempt was used without a value
    Exhausted {
        /// Attempts made
        attempts: u32,
        /// Error from the most recent failing check, if any failed
        last_error: Option<E>,
    },
}

/// Run `check` until it yields a value or the policy runs out of attempts
///
/// `check` receives the 1-based attempt number and returns:
/// - `Ok(Some(value))` to stop early,
/// - `Ok(None)` to keep polling,
/// - `Err(error)` for a failed check, which is logged and polling continues.
///
/// Attempt `n + 1` starts `policy.delay_for_attempt(n)` after attempt `n`
/// finished; the first attempt starts immediately.
pub async fn poll_until<F, Fut, T, E>(policy: &RetryPolicy, mut check: F) -> PollOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: Display,
{
    let mut last_error = None;
    let mut attempt = 0;

    while policy.should_retry(attempt) {
        if attempt > 0 {
            let delay = policy.delay_for_attempt(attempt);
            tracing::debug!(attempt, delay_ms = delay.as_millis(), "Waiting before next poll");
            sleep(delay).await;
        }
        attempt += 1;

        match check(attempt).await {
            Ok(Some(value)) => {
                tracing::debug!(attempt, "Poll resolved");
                return PollOutcome::Resolved {
                    value,
                    attempts: attempt,
                };
            },
            Ok(None) => {
                tracing::debug!(attempt, "Poll not settled yet");
            },
            Err(error) => {
                tracing::warn!(attempt, error = %error, "Poll attempt failed");
                last_error = Some(error);
            },
        }
    }

    tracing::warn!(attempts = attempt, "Polling exhausted");
    PollOutcome::Exhausted {
        attempts: attempt,
        last_error,
    }
}
