//! Typed change events published on the event bus.
//!
//! Reducers mutate state, then publish one of these events so presentation
//! components know to re-read the slice they render. Events carry summaries,
//! never the full slice; subscribers read current state through the store.

use crate::actions::AppAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stellar_burgers_core::Effect;
use stellar_burgers_core::event_bus::{BusEvent, EventBus};

/// Topic names, one per slice.
pub mod topics {
    /// Ingredient catalog loads and failures
    pub const CATALOG: &str = "catalog-events";
    /// Burger composition changes
    pub const CONSTRUCTOR: &str = "constructor-events";
    /// Checkout progress and order submission results
    pub const ORDER: &str = "order-events";
    /// Login/logout and guard notifications
    pub const SESSION: &str = "session-events";
    /// Feed and order history
    pub const FEED: &str = "feed-events";
}

/// The change notifications components consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AppEvent {
    /// The burger composition changed
    ConstructorChanged {
        /// Current total price
        total_price: u64,
        /// Number of non-bun entries
        item_count: usize,
    },
    /// The constructor was reset to empty
    ConstructorCleared,
    /// The catalog loaded
    IngredientsLoaded {
        /// Number of catalog entries
        count: usize,
    },
    /// The catalog fetch failed
    IngredientsFailed {
        /// Error message
        message: String,
    },
    /// An order was accepted by the API
    OrderAccepted {
        /// Order number
        number: u64,
    },
    /// An order submission failed
    OrderFailed {
        /// Error message
        message: String,
    },
    /// An unauthenticated visitor needs the login page
    LoginRequired {
        /// Origin path to return to after login
        from: String,
    },
    /// The boot-time auth check completed
    AuthChecked {
        /// A valid session exists
        is_authenticated: bool,
    },
    /// A login or registration succeeded
    LoginSucceeded {
        /// The user's email
        email: String,
    },
    /// A login or registration failed
    LoginFailed {
        /// Error message
        message: String,
    },
    /// The user logged out
    LoggedOut,
    /// The user's profile changed
    UserUpdated,
    /// The public feed loaded
    FeedLoaded {
        /// Number of feed orders
        count: usize,
    },
}

impl AppEvent {
    /// The topic this event is published on.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::ConstructorChanged { .. } | Self::ConstructorCleared => topics::CONSTRUCTOR,
            Self::IngredientsLoaded { .. } | Self::IngredientsFailed { .. } => topics::CATALOG,
            Self::OrderAccepted { .. } | Self::OrderFailed { .. } => topics::ORDER,
            Self::LoginRequired { .. }
            | Self::AuthChecked { .. }
            | Self::LoginSucceeded { .. }
            | Self::LoginFailed { .. }
            | Self::LoggedOut
            | Self::UserUpdated => topics::SESSION,
            Self::FeedLoaded { .. } => topics::FEED,
        }
    }

    /// Stable event name carried in [`BusEvent::event_type`].
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ConstructorChanged { .. } => "constructor-changed",
            Self::ConstructorCleared => "constructor-cleared",
            Self::IngredientsLoaded { .. } => "ingredients-loaded",
            Self::IngredientsFailed { .. } => "ingredients-failed",
            Self::OrderAccepted { .. } => "order-accepted",
            Self::OrderFailed { .. } => "order-failed",
            Self::LoginRequired { .. } => "login-required",
            Self::AuthChecked { .. } => "auth-checked",
            Self::LoginSucceeded { .. } => "login-succeeded",
            Self::LoginFailed { .. } => "login-failed",
            Self::LoggedOut => "logged-out",
            Self::UserUpdated => "user-updated",
            Self::FeedLoaded { .. } => "feed-loaded",
        }
    }

    /// Convert into a wire event stamped with the mutation time.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be converted to
    /// JSON, which cannot happen for these variants in practice.
    pub fn into_bus_event(self, occurred_at: DateTime<Utc>) -> serde_json::Result<BusEvent> {
        let event_type = self.event_type();
        let payload = serde_json::to_value(&self)?;
        Ok(BusEvent::new(event_type, payload, occurred_at))
    }

    /// Parse a wire event back into a typed event.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error for unknown event types or malformed
    /// payloads.
    pub fn from_bus_event(event: &BusEvent) -> serde_json::Result<Self> {
        serde_json::from_value(event.payload.clone())
    }
}

/// Build a fire-and-forget publish effect for a typed event.
///
/// A failed publish is logged by the runtime and never blocks the reducer.
pub(crate) fn publish(
    bus: &Arc<dyn EventBus>,
    event: AppEvent,
    occurred_at: DateTime<Utc>,
) -> Effect<AppAction> {
    let topic = event.topic();
    match event.into_bus_event(occurred_at) {
        Ok(bus_event) => Effect::publish(Arc::clone(bus), topic, bus_event),
        Err(error) => {
            tracing::error!(%error, "failed to serialize change event");
            Effect::None
        },
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code can use expect
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_through_the_wire_format() {
        let event = AppEvent::ConstructorChanged {
            total_price: 130,
            item_count: 2,
        };

        let bus_event = event
            .clone()
            .into_bus_event(Utc::now())
            .expect("serializes");
        assert_eq!(bus_event.event_type, "constructor-changed");
        assert_eq!(bus_event.payload["total_price"], 130);

        let back = AppEvent::from_bus_event(&bus_event).expect("deserializes");
        assert_eq!(back, event);
    }

    #[test]
    fn every_event_maps_to_its_slice_topic() {
        assert_eq!(AppEvent::ConstructorCleared.topic(), topics::CONSTRUCTOR);
        assert_eq!(
            AppEvent::OrderAccepted { number: 42 }.topic(),
            topics::ORDER
        );
        assert_eq!(
            AppEvent::LoginRequired {
                from: "/".to_string()
            }
            .topic(),
            topics::SESSION
        );
        assert_eq!(AppEvent::FeedLoaded { count: 10 }.topic(), topics::FEED);
    }
}
