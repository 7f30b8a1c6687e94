//! Application actions.
//!
//! Every input to the state tree is an [`AppAction`]: user intent dispatched
//! by the shell, and async results fed back by effects. Reducers are the only
//! code that interprets them.

use crate::state::{
    ContactInfo, DeliveryInfo, Ingredient, InstanceId, MoveDirection, Order, User,
};

/// All actions processed by the application reducers.
#[derive(Debug, Clone)]
pub enum AppAction {
    // ═══════════════════════════════════════════════════════════════
    // Catalog
    // ═══════════════════════════════════════════════════════════════
    /// Fetch the ingredient catalog
    FetchIngredients,

    /// Catalog fetch succeeded
    IngredientsLoaded {
        /// The full catalog
        ingredients: Vec<Ingredient>,
    },

    /// Catalog fetch failed
    IngredientsFailed {
        /// Error message
        message: String,
    },

    // ═══════════════════════════════════════════════════════════════
    // Constructor
    // ═══════════════════════════════════════════════════════════════
    /// Add an ingredient to the burger; a bun replaces the current bun
    AddIngredient(Ingredient),

    /// Remove the constructor entry with this instance id (no-op if absent)
    RemoveIngredient(InstanceId),

    /// Swap an ingredient with its neighbor; out-of-range is a defined no-op
    MoveItem {
        /// Index of the entry to move
        index_from: usize,
        /// Swap direction
        direction: MoveDirection,
    },

    /// Reset the constructor to empty
    ClearConstructor,

    // ═══════════════════════════════════════════════════════════════
    // Checkout & order submission
    // ═══════════════════════════════════════════════════════════════
    /// Start checkout at the cart step
    OpenCheckout,

    /// Submit the delivery form
    SetDelivery(DeliveryInfo),

    /// Submit the contacts form
    SetContacts(ContactInfo),

    /// Advance the checkout step (blocked by missing or invalid form data)
    NextStep,

    /// Go back one checkout step
    PrevStep,

    /// Submit the assembled burger as an order
    SubmitOrder {
        /// Route the submission came from, echoed in the login-required
        /// event so unauthenticated users return there after logging in
        from: String,
    },

    /// Order submission succeeded
    OrderAccepted {
        /// The accepted order
        order: Order,
    },

    /// Order submission failed
    OrderFailed {
        /// Error message
        message: String,
    },

    /// Reset the order slice (closing the success view)
    ClearOrderDetails,

    // ═══════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════
    /// Boot-time auth check: token lookup, profile fetch, mark auth-checked
    CheckAuth,

    /// Auth check completed, with the profile if a valid session exists
    AuthChecked {
        /// The profile, if authenticated
        user: Option<User>,
    },

    /// Log in with credentials
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Login succeeded; tokens are already persisted
    LoginSucceeded {
        /// The profile
        user: User,
    },

    /// Login failed
    LoginFailed {
        /// Error message
        message: String,
    },

    /// Register a new account
    Register {
        /// Email address
        email: String,
        /// Display name
        name: String,
        /// Password
        password: String,
    },

    /// Registration succeeded; tokens are already persisted
    RegisterSucceeded {
        /// The profile
        user: User,
    },

    /// Registration failed
    RegisterFailed {
        /// Error message
        message: String,
    },

    /// Log out: revoke the refresh token, clear both tokens
    Logout,

    /// Logout finished; tokens are cleared even if revocation failed
    LogoutCompleted,

    /// Update the profile
    UpdateUser(UserUpdate),

    /// Profile update succeeded
    UserUpdated {
        /// The updated profile
        user: User,
    },

    /// Profile update failed
    UserUpdateFailed {
        /// Error message
        message: String,
    },

    /// Request a password-reset email
    ForgotPassword {
        /// Email address
        email: String,
    },

    /// Complete a password reset with the emailed token
    ResetPassword {
        /// New password
        password: String,
        /// Reset token from the email
        token: String,
    },

    /// A password-reset request or completion succeeded
    PasswordResetSucceeded,

    /// A password-reset request or completion failed
    PasswordResetFailed {
        /// Error message
        message: String,
    },

    // ═══════════════════════════════════════════════════════════════
    // Feed & order history
    // ═══════════════════════════════════════════════════════════════
    /// Fetch the public order feed
    FetchFeed,

    /// Feed fetch succeeded
    FeedLoaded {
        /// Feed orders
        orders: Vec<Order>,
        /// All-time order count
        total: u64,
        /// Today's order count
        total_today: u64,
    },

    /// Feed fetch failed
    FeedFailed {
        /// Error message
        message: String,
    },

    /// Fetch the logged-in user's order history
    FetchProfileOrders,

    /// Profile order history fetch succeeded
    ProfileOrdersLoaded {
        /// The user's orders
        orders: Vec<Order>,
    },

    /// Profile order history fetch failed
    ProfileOrdersFailed {
        /// Error message
        message: String,
    },

    /// Fetch a single order for the order-info view
    FetchOrderByNumber {
        /// Order number
        number: u64,
    },

    /// Order-by-number fetch succeeded
    OrderByNumberLoaded {
        /// The order
        order: Order,
    },

    /// Order-by-number fetch failed
    OrderByNumberFailed {
        /// Error message
        message: String,
    },
}

/// Partial profile update; `None` fields are left unchanged.
///
/// Serializes without absent fields so the remote API only sees what
/// actually changed.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserUpdate {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
