//! Application state.
//!
//! This module defines the single state tree for the burger constructor
//! application. State is created empty at boot and mutated only by reducers
//! while the store holds the write lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog id of an ingredient, assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

impl IngredientId {
    /// Create an ingredient id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locally generated id of one constructor entry.
///
/// The same catalog ingredient may appear several times in one burger, so
/// each added entry gets its own instance id (uuid v4 via the environment's
/// `IdGenerator`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create an instance id from a generated string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ingredient category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// Buns bracket the burger; at most one may be selected
    Bun,
    /// Main fillings
    Main,
    /// Sauces
    Sauce,
}

/// Immutable catalog reference data, fetched once from the ingredients endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog id
    pub id: IngredientId,
    /// Display name
    pub name: String,
    /// Category
    pub kind: IngredientKind,
    /// Price in integer currency units
    pub price: u64,
    /// Energy value
    pub calories: u32,
    /// Proteins, grams
    pub proteins: u32,
    /// Fat, grams
    pub fat: u32,
    /// Carbohydrates, grams
    pub carbohydrates: u32,
    /// Card image URL
    pub image: String,
    /// Mobile image URL
    pub image_mobile: String,
    /// Large image URL
    pub image_large: String,
}

/// An ingredient placed into the constructor, with its per-entry instance id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorIngredient {
    /// The catalog ingredient
    pub ingredient: Ingredient,
    /// Locally generated id of this entry
    pub instance_id: InstanceId,
}

/// The in-progress burger.
///
/// Invariants: at most one bun; `ingredients` never contains `Bun` items;
/// the order of `ingredients` is significant (build order, submitted to the
/// orders endpoint).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorState {
    /// Selected bun, if any
    pub bun: Option<ConstructorIngredient>,
    /// Non-bun ingredients in build order
    pub ingredients: Vec<ConstructorIngredient>,
}

/// Direction of a constructor reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Towards the top of the burger (index - 1)
    Up,
    /// Towards the bottom of the burger (index + 1)
    Down,
}

/// Checkout step machine: `Cart → Delivery → Contacts → Success`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Reviewing the assembled burger
    #[default]
    Cart,
    /// Entering the delivery address and payment method
    Delivery,
    /// Entering contact details
    Contacts,
    /// Order accepted by the API
    Success,
}

/// Payment method selected on the delivery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Pay online at submission
    Online,
    /// Pay the courier
    OnDelivery,
}

/// Delivery form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    /// Delivery address (non-empty)
    pub address: String,
    /// Payment method
    pub payment: PaymentMethod,
}

/// Contact form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

/// Per-field validation errors for the checkout forms.
///
/// Validation errors never leave the process; they block advancement inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutErrors {
    /// Delivery address error
    pub address: Option<String>,
    /// Email format error
    pub email: Option<String>,
    /// Phone format error
    pub phone: Option<String>,
}

impl CheckoutErrors {
    /// `true` when no field has a pending validation error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Checkout progress and form data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Current step
    pub step: CheckoutStep,
    /// Validated delivery form data, once entered
    pub delivery: Option<DeliveryInfo>,
    /// Validated contact form data, once entered
    pub contacts: Option<ContactInfo>,
    /// Per-field validation errors
    pub errors: CheckoutErrors,
}

/// Remote order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Registered, not yet cooking
    Created,
    /// Cooking
    Pending,
    /// Ready
    Done,
}

/// An order as known to the application.
///
/// Orders created by submission carry the total computed from the
/// constructor at submit time; orders sourced from the feed carry `total: 0`
/// and are priced via [`crate::selectors::order_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order number assigned by the API
    pub number: u64,
    /// Burger name assigned by the API
    pub name: String,
    /// Status
    pub status: OrderStatus,
    /// Ingredient ids, bun first and last
    pub ingredients: Vec<IngredientId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Total price in integer currency units
    pub total: u64,
}

/// Order submission slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    /// The last accepted order
    pub order: Option<Order>,
    /// A submission is in flight; blocks duplicate submission
    pub order_request: bool,
    /// Error message from the last failed submission
    pub error: Option<String>,
}

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
}

/// Session slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The boot-time auth check has completed (one way or the other)
    pub is_auth_checked: bool,
    /// A user is logged in
    pub is_authenticated: bool,
    /// The logged-in user's profile
    pub user: Option<User>,
    /// Error message from the last failed auth operation
    pub error: Option<String>,
}

/// Ingredient catalog slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// A fetch is in flight, or the catalog has never fully loaded.
    ///
    /// Stays raised on a failed fetch: the application never renders a
    /// half-loaded catalog.
    pub is_loading: bool,
    /// The catalog, once loaded
    pub ingredients: Vec<Ingredient>,
    /// Error message from the last failed fetch
    pub error: Option<String>,
}

/// Public feed, profile order history, and the order-info view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedState {
    /// Public feed orders
    pub orders: Vec<Order>,
    /// All-time order count reported by the feed
    pub total: u64,
    /// Today's order count reported by the feed
    pub total_today: u64,
    /// A feed fetch is in flight
    pub is_loading: bool,
    /// Error message from the last failed fetch
    pub error: Option<String>,
    /// The logged-in user's order history
    pub profile_orders: Vec<Order>,
    /// The order shown in the order-info view
    pub current_order: Option<Order>,
}

/// The application state tree.
///
/// Created empty at boot; constructor and order details are reset on logout
/// and after a successful order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Ingredient catalog
    pub catalog: CatalogState,
    /// The in-progress burger
    pub constructor: ConstructorState,
    /// Checkout progress
    pub checkout: CheckoutState,
    /// Order submission
    pub order: OrderState,
    /// Session and user
    pub session: SessionState,
    /// Feed and order history
    pub feed: FeedState,
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code can use expect
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = AppState::default();
        assert!(state.constructor.bun.is_none());
        assert!(state.constructor.ingredients.is_empty());
        assert!(!state.session.is_auth_checked);
        assert!(!state.order.order_request);
        assert_eq!(state.checkout.step, CheckoutStep::Cart);
    }

    #[test]
    fn ingredient_kind_uses_wire_names() {
        let json = serde_json::to_string(&IngredientKind::Bun).expect("serializes");
        assert_eq!(json, "\"bun\"");

        let kind: IngredientKind = serde_json::from_str("\"sauce\"").expect("deserializes");
        assert_eq!(kind, IngredientKind::Sauce);
    }

    #[test]
    fn payment_method_uses_kebab_case() {
        let json = serde_json::to_string(&PaymentMethod::OnDelivery).expect("serializes");
        assert_eq!(json, "\"on-delivery\"");
    }
}
