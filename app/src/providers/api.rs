//! Burger API provider trait.

use crate::actions::UserUpdate;
use crate::state::{Ingredient, IngredientId, Order, User};
use std::future::Future;
use thiserror::Error;

/// Errors returned by [`BurgerApi`] implementations.
///
/// Every variant is recoverable: effects convert these into the owning
/// slice's error field, cleared on the next attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection failure, DNS, timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the body, if any
        message: String,
    },

    /// The API answered `success: false`, possibly on HTTP 200
    #[error("API error: {message}")]
    Api {
        /// Error message from the body
        message: String,
    },

    /// The access token was rejected; a refresh may recover the session
    #[error("Not authorized")]
    Unauthorized,

    /// The body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Access and refresh token pair.
///
/// Both tokens are persisted through [`super::TokenStore`] and cleared
/// together on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token, sent in the `Authorization` header
    pub access_token: String,
    /// Long-lived token exchanged at `/auth/token`
    pub refresh_token: String,
}

/// Successful login or registration response.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    /// The user's profile
    pub user: User,
    /// Fresh token pair
    pub tokens: TokenPair,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Order number assigned by the API
    pub number: u64,
    /// Burger name assigned by the API
    pub name: String,
}

/// One page of the public order feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// Feed orders, newest first
    pub orders: Vec<Order>,
    /// All-time order count
    pub total: u64,
    /// Today's order count
    pub total_today: u64,
}

/// REST API consumed by the application.
///
/// # Implementation Notes
///
/// - Responses carry a `success` flag; `success: false` is an error even on
///   HTTP 200 and maps to [`ApiError::Api`]
/// - A rejected access token maps to [`ApiError::Unauthorized`] so the
///   session reducer can attempt a one-shot refresh
pub trait BurgerApi: Send + Sync {
    /// Fetch the ingredient catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a failed response envelope.
    fn fetch_ingredients(
        &self,
    ) -> impl Future<Output = Result<Vec<Ingredient>, ApiError>> + Send;

    /// Fetch the profile of the token's user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token.
    fn fetch_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Update the profile of the token's user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token.
    fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Log in with credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] for rejected credentials.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthPayload, ApiError>> + Send;

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the account cannot be created.
    fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthPayload, ApiError>> + Send;

    /// Revoke a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure; callers clear local tokens
    /// regardless.
    fn logout(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Exchange a refresh token for a fresh pair.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid or revoked refresh token.
    fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<TokenPair, ApiError>> + Send;

    /// Submit an order composition.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or an API
    /// error when the order is refused.
    fn submit_order(
        &self,
        access_token: &str,
        ingredients: &[IngredientId],
    ) -> impl Future<Output = Result<OrderConfirmation, ApiError>> + Send;

    /// Fetch the public order feed.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a failed response envelope.
    fn fetch_feed(&self) -> impl Future<Output = Result<FeedSnapshot, ApiError>> + Send;

    /// Fetch the token's user order history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token.
    fn fetch_profile_orders(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// Fetch one order by number.
    ///
    /// # Errors
    ///
    /// Returns an error when the order does not exist.
    fn fetch_order_by_number(
        &self,
        number: u64,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a failed response envelope.
    fn forgot_password(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Complete a password reset with the emailed token.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid reset token.
    fn reset_password(
        &self,
        password: &str,
        token: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
