//! Configuration management for the Gatepass client.
//!
//! Loads configuration from environment variables (optionally seeded from a
//! `.env` file) with sensible defaults.

use gatepass_runtime::{Backoff, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST backend settings
    pub api: ApiConfig,
    /// Payment confirmation polling
    pub payment_poll: PollConfig,
    /// Bearer token to start the session with
    pub token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api", &self.api)
            .field("payment_poll", &self.payment_poll)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Payment confirmation polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Attempts before giving up, including the first
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds
    pub initial_delay_ms: u64,
    /// Cap on a single wait in milliseconds
    pub max_delay_ms: u64,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present
    ///
    /// # Environment Variables
    ///
    /// - `GATEPASS_API_URL`: REST base URL (default: `http://localhost:8080/api`)
    /// - `GATEPASS_REQUEST_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `GATEPASS_CONNECT_TIMEOUT_SECS`: connect timeout (default: 10)
    /// - `GATEPASS_TOKEN`: bearer token to start with (default: unset)
    /// - `GATEPASS_POLL_MAX_ATTEMPTS`: payment poll ceiling (default: 5)
    /// - `GATEPASS_POLL_INITIAL_DELAY_MS`: backoff step (default: 2000)
    /// - `GATEPASS_POLL_MAX_DELAY_MS`: backoff cap (default: 10000)
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            api: ApiConfig {
                base_url: lookup("GATEPASS_API_URL")
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| "http://localhost:8080/api".to_string()),
                request_timeout_secs: number("GATEPASS_REQUEST_TIMEOUT_SECS", 30),
                connect_timeout_secs: number("GATEPASS_CONNECT_TIMEOUT_SECS", 10),
            },
            payment_poll: PollConfig {
                max_attempts: lookup("GATEPASS_POLL_MAX_ATTEMPTS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(5),
                initial_delay_ms: number("GATEPASS_POLL_INITIAL_DELAY_MS", 2000),
                max_delay_ms: number("GATEPASS_POLL_MAX_DELAY_MS", 10_000),
            },
            token: lookup("GATEPASS_TOKEN").filter(|t| !t.trim().is_empty()),
        }
    }

    /// Whole-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Connect timeout
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }

    /// Linear retry policy for payment confirmation
    #[must_use]
    pub fn payment_poll_policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(self.payment_poll.max_attempts)
            .initial_delay(Duration::from_millis(self.payment_poll.initial_delay_ms))
            .max_delay(Duration::from_millis(self.payment_poll.max_delay_ms))
            .backoff(Backoff::Linear)
            .build()
    }
}
