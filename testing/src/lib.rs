//! # Call Center Testing
//!
//! Testing utilities and helpers for the call-center console.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - The Given/When/Then [`ReducerTest`] harness
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use callcenter_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(DashboardReducer::new())
//!     .with_env(test_environment())
//!     .given_state(DashboardState::seeded())
//!     .when_action(DashboardAction::take("1"))
//!     .then_state(|state| assert_eq!(state.audit_log.len(), 3))
//!     .run();
//! ```

use callcenter_core::environment::{Clock, IdGenerator};
use chrono::{DateTime, Duration, Utc};

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Duration, IdGenerator, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use callcenter_testing::mocks::FixedClock;
    /// use callcenter_core::environment::Clock;
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

    /// Clock that moves forward by a fixed step on every read
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// First read returns `start`, each later read adds `step`
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = match self.next.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Hands out a scripted list of identifiers, then falls back to a counter
    ///
    /// ```
    /// use callcenter_testing::mocks::ScriptedIds;
    /// use callcenter_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIds::new(["a", "b"]);
    /// assert_eq!(ids.next_id(), "a");
    /// assert_eq!(ids.next_id(), "b");
    /// assert_eq!(ids.next_id(), "scripted-3");
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIds {
        inner: Mutex<(VecDeque<String>, usize)>,
    }

    impl ScriptedIds {
        /// Create a generator that returns `ids` in order
        #[must_use]
        pub fn new<I, T>(ids: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                inner: Mutex::new((ids.into_iter().map(Into::into).collect(), 0)),
            }
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> String {
            let mut inner = match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.1 += 1;
            let issued = inner.1;
            inner
                .0
                .pop_front()
                .unwrap_or_else(|| format!("scripted-{issued}"))
        }
    }

    /// Create a default fixed clock for tests (2026-01-17 11:50:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-01-17T11:50:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Property-based testing strategies
pub mod properties {
    use proptest::prelude::*;

    /// Short operator comments, including empty and non-ASCII ones
    pub fn comment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-z ]{1,24}",
            Just("Карта заблокирована".to_string()),
        ]
    }

    /// Identifiers that never appear in seeded data
    pub fn unknown_id() -> impl Strategy<Value = String> {
        "x[0-9a-f]{1,8}"
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ScriptedIds, SteppingClock, test_clock};
