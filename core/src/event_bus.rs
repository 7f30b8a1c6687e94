//! Event bus abstraction for change notifications.
//!
//! This module provides the [`EventBus`] trait for publishing and subscribing
//! to application events. Reducers mutate state and publish a change event;
//! presentation components subscribe to the topics they render and re-read
//! state when notified.
//!
//! ```text
//! ┌────────────────────┐
//! │ User intent action │
//! └─────────┬──────────┘
//!           ▼
//! ┌────────────────────┐
//! │      Reducer       │◄── single source of truth mutated here
//! └─────────┬──────────┘
//!           ▼
//! ┌────────────────────┐
//! │  Publish to bus    │◄── "constructor-events", "session-events", ...
//! └─────────┬──────────┘
//!      ┌────┴─────┐
//!      ▼          ▼
//! ┌─────────┐ ┌─────────┐
//! │ Cart    │ │ Modal   │   subscribers re-render from state
//! └─────────┘ └─────────┘
//! ```
//!
//! # Key Principles
//!
//! - **State first**: the store is mutated before the notification goes out
//! - **Payloads are data**: each event carries a JSON payload, never closures
//! - **No cancellation, no priority**: delivery order within a topic follows
//!   publish order; subscribers must tolerate duplicate notifications
//!
//! # Topic Naming Convention
//!
//! Topics follow the pattern `{slice}-events`:
//! - `catalog-events` - ingredient catalog loads and failures
//! - `constructor-events` - burger composition changes
//! - `order-events` - checkout progress and order submission results
//! - `session-events` - login/logout and guard notifications

use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during event bus operations.
#[derive(Error, Debug, Clone)]
pub enum EventBusError {
    /// Failed to publish an event to a topic
    #[error("Publish failed for topic '{topic}': {reason}")]
    PublishFailed {
        /// The topic that failed
        topic: String,
        /// The reason for failure
        reason: String,
    },

    /// Failed to subscribe to topics
    #[error("Subscription failed for topics {topics:?}: {reason}")]
    SubscriptionFailed {
        /// The topics that failed to subscribe
        topics: Vec<String>,
        /// The reason for failure
        reason: String,
    },

    /// Failed to serialize an event payload
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The bus is closed and no longer delivering events
    #[error("Event bus closed")]
    Closed,
}

/// An event as it travels over the bus.
///
/// Events are named, carry a JSON payload, and are stamped with the time the
/// originating mutation happened. They describe what changed, never how to
/// render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    /// Stable event name (e.g. `"constructor-changed"`)
    pub event_type: String,

    /// Structured payload for subscribers
    pub payload: serde_json::Value,

    /// When the originating state mutation occurred
    pub occurred_at: DateTime<Utc>,
}

impl BusEvent {
    /// Create a new bus event.
    #[must_use]
    pub fn new(
        event_type: impl Into<String>,
        payload: serde_json::Value,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            occurred_at,
        }
    }
}

/// Stream of events from subscriptions.
///
/// Each item is a `Result` that may contain an event or a delivery error.
///
/// # Examples
///
/// ```rust,ignore
/// use futures::StreamExt;
///
/// let mut stream = bus.subscribe(&["constructor-events"]).await?;
/// while let Some(result) = stream.next().await {
///     match result {
///         Ok(event) => rerender(&event),
///         Err(e) => tracing::error!("event stream error: {e}"),
///     }
/// }
/// ```
pub type EventStream = Pin<Box<dyn Stream<Item = Result<BusEvent, EventBusError>> + Send>>;

/// Trait for event bus implementations.
///
/// The [`EventBus`] trait provides publish/subscribe capabilities keyed by
/// topic name. Multiple subscribers may listen on the same topic; every
/// subscriber receives every event published after it subscribed.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to support concurrent access
/// from effect executors.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn EventBus>`). This is
/// required for the effect system, where reducers create publish effects that
/// capture the bus.
pub trait EventBus: Send + Sync {
    /// Publish an event to a topic.
    ///
    /// # Arguments
    ///
    /// - `topic`: The topic to publish to (e.g. "constructor-events")
    /// - `event`: The event to publish
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::PublishFailed`] if the publish operation fails.
    fn publish(
        &self,
        topic: &str,
        event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>>;

    /// Subscribe to one or more topics and receive a stream of events.
    ///
    /// Returns an [`EventStream`] that yields events from all subscribed
    /// topics in publish order per topic.
    ///
    /// # Arguments
    ///
    /// - `topics`: Array of topic names to subscribe to
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::SubscriptionFailed`] if subscription fails.
    fn subscribe(
        &self,
        topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    #[allow(clippy::expect_used)] // Test code can use expect
    fn bus_event_round_trips_through_json() {
        let event = BusEvent::new(
            "constructor-changed",
            serde_json::json!({ "total_price": 130 }),
            Utc::now(),
        );

        let json = serde_json::to_string(&event).expect("event serializes");
        let back: BusEvent = serde_json::from_str(&json).expect("event deserializes");
        assert_eq!(back, event);
    }
}
