//! # Stellar Burgers Testing
//!
//! Testing utilities and helpers for the Stellar Burgers architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory event bus that captures published events
//! - A fluent reducer test harness with Given-When-Then syntax
//!
//! ## Example
//!
//! ```ignore
//! use stellar_burgers_testing::{ReducerTest, test_clock};
//!
//! #[test]
//! fn adding_a_bun_replaces_the_previous_one() {
//!     ReducerTest::new(ConstructorReducer::new())
//!         .with_env(test_environment())
//!         .given_state(state_with_bun(krator_bun()))
//!         .when_action(AppAction::AddIngredient(fluorescent_bun()))
//!         .then_state(|state| {
//!             assert_eq!(state.constructor.bun.as_ref().map(|b| &b.name),
//!                        Some(&"Fluorescent bun".to_string()));
//!         })
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use stellar_burgers_core::environment::{Clock, IdGenerator};

pub mod event_bus;
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stellar_burgers_testing::mocks::FixedClock;
    /// use stellar_burgers_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
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

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Deterministic id generator for tests
    ///
    /// Produces `id-1`, `id-2`, ... so assertions can name instance ids.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        counter: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `id-1`.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                counter: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            format!("id-{n}")
        }
    }
}

// Re-export commonly used items
pub use event_bus::InMemoryEventBus;
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn sequential_ids_are_predictable() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), "id-1");
        assert_eq!(ids.next_id(), "id-2");
    }
}
