//! # Gatepass Testing
//!
//! Test support for Gatepass features and repositories.
//!
//! This crate provides:
//! - [`FixedClock`] for deterministic time
//! - [`ReducerTest`], a Given-When-Then harness for reducers, plus effect
//!   assertions
//! - [`MockTransport`](transport::MockTransport), a scripted backend that
//!   records requests
//! - helpers for checking `Loading → terminal` resource sequences
//!
//! ## Example
//!
//! ```ignore
//! use gatepass_testing::transport::{MockTransport, envelope_ok};
//! use gatepass_testing::resources::collect_resources;
//!
//! #[tokio::test]
//! async fn categories_load() {
//!     let transport = MockTransport::new();
//!     transport.on_get("/categories", envelope_ok(vec![music()]));
//!
//!     let repo = CatalogRepository::new(client_over(&transport));
//!     let states = collect_resources(repo.categories()).await;
//!
//!     assert_eq!(states.len(), 2);
//! }
//! ```

use chrono::{DateTime, Utc};
use gatepass_core::environment::Clock;

pub mod reducer_test;
pub mod transport;

pub use reducer_test::{ReducerTest, assertions, drain_effect};
pub use transport::MockTransport;

/// Mock implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use gatepass_testing::mocks::FixedClock;
    /// use gatepass_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Fixed clock at 2026-06-01 12:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
                .map_or(DateTime::UNIX_EPOCH, |t| t.with_timezone(&Utc)),
        )
    }
}

/// Helpers for `Resource` streams
pub mod resources {
    use futures::{Stream, StreamExt};
    use gatepass_core::Resource;

    /// Collect every state a repository stream emits
    pub async fn collect_resources<T, S>(stream: S) -> Vec<Resource<T>>
    where
        S: Stream<Item = Resource<T>>,
    {
        stream.collect().await
    }

    /// Assert the stream shape `[Loading, terminal]` and return the terminal
    ///
    /// # Panics
    ///
    /// Panics if the sequence is anything else.
    #[allow(clippy::panic)] // Test assertion
    #[must_use]
    pub fn expect_terminal<T: std::fmt::Debug>(states: &[Resource<T>]) -> &Resource<T> {
        match states {
            [Resource::Loading, terminal] if terminal.is_terminal() => terminal,
            other => panic!("expected [Loading, terminal], got {other:?}"),
        }
    }
}

/// Store helpers
pub mod store {
    use gatepass_core::reducer::Reducer;
    use gatepass_runtime::{Store, StoreError};
    use std::time::Duration;

    /// Send an action and wait up to five seconds for the effects it started
    ///
    /// # Errors
    ///
    /// Returns the store's error if the send is rejected or the effects do
    /// not finish in time.
    pub async fn send_and_settle<S, A, E, R>(
        store: &Store<S, A, E, R>,
        action: A,
    ) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + Clone + 'static,
        E: Send + Sync + 'static,
    {
        store
            .send(action)
            .await?
            .wait_with_timeout(Duration::from_secs(5))
            .await
    }
}

/// Install a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; output goes through the test harness capture.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub use mocks::{FixedClock, test_clock};
