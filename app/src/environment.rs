//! Application environment.
//!
//! This module defines the environment type for dependency injection in the
//! application reducers.

use crate::providers::{BurgerApi, TokenStore};
use std::sync::Arc;
use stellar_burgers_core::environment::{Clock, IdGenerator};
use stellar_burgers_core::event_bus::EventBus;
use uuid::Uuid;

/// Application environment.
///
/// Contains all external dependencies needed by the reducers.
///
/// # Type Parameters
///
/// - `A`: Burger API
/// - `T`: Token store
#[derive(Clone)]
pub struct AppEnvironment<A, T>
where
    A: BurgerApi + Clone,
    T: TokenStore + Clone,
{
    /// REST API.
    pub api: A,

    /// Persisted token storage.
    pub tokens: T,

    /// Time source, stamps published events.
    pub clock: Arc<dyn Clock>,

    /// Instance id generator for constructor entries.
    pub ids: Arc<dyn IdGenerator>,

    /// Event bus for change notifications.
    pub event_bus: Arc<dyn EventBus>,
}

impl<A, T> AppEnvironment<A, T>
where
    A: BurgerApi + Clone,
    T: TokenStore + Clone,
{
    /// Create a new application environment.
    #[must_use]
    pub fn new(
        api: A,
        tokens: T,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            api,
            tokens,
            clock,
            ids,
            event_bus,
        }
    }
}

/// Production id generator backed by uuid v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generator_produces_unique_ids() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
