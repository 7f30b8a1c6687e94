//! Mock burger API for testing.

#![allow(clippy::unwrap_used)] // Mock internals lock an in-process mutex

use crate::actions::UserUpdate;
use crate::providers::{
    ApiError, AuthPayload, BurgerApi, FeedSnapshot, OrderConfirmation, TokenPair,
};
use crate::state::{Ingredient, IngredientId, Order, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock burger API.
///
/// In-memory implementation with per-endpoint failure injection and call
/// recording. Seed it with [`MockBurgerApi::add_ingredients`] and
/// [`MockBurgerApi::register_user`], then drive the reducers as usual.
///
/// # Example
///
/// ```ignore
/// let api = MockBurgerApi::new();
/// api.register_user("user@example.com", "User", "secret");
/// api.fail_endpoint("orders", "Order service unavailable");
/// ```
#[derive(Debug, Clone)]
pub struct MockBurgerApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    ingredients: Vec<Ingredient>,
    users: HashMap<String, RegisteredUser>,
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, String>,
    failures: HashMap<String, String>,
    submitted: Vec<Vec<IngredientId>>,
    feed_orders: Vec<Order>,
    feed_total: u64,
    feed_total_today: u64,
    profile_orders: Vec<Order>,
    password_reset_requests: Vec<String>,
    next_order_number: u64,
    next_token: u64,
}

#[derive(Debug, Clone)]
struct RegisteredUser {
    user: User,
    password: String,
}

impl MockBurgerApi {
    /// Create an empty mock API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                ingredients: Vec::new(),
                users: HashMap::new(),
                access_tokens: HashMap::new(),
                refresh_tokens: HashMap::new(),
                failures: HashMap::new(),
                submitted: Vec::new(),
                feed_orders: Vec::new(),
                feed_total: 0,
                feed_total_today: 0,
                profile_orders: Vec::new(),
                password_reset_requests: Vec::new(),
                next_order_number: 1000,
                next_token: 0,
            })),
        }
    }

    /// Seed the ingredient catalog.
    pub fn add_ingredients(&self, ingredients: Vec<Ingredient>) {
        self.inner.lock().unwrap().ingredients.extend(ingredients);
    }

    /// Register an account the mock will accept credentials for.
    pub fn register_user(&self, email: &str, name: &str, password: &str) {
        self.inner.lock().unwrap().users.insert(
            email.to_string(),
            RegisteredUser {
                user: User {
                    email: email.to_string(),
                    name: name.to_string(),
                },
                password: password.to_string(),
            },
        );
    }

    /// Mint a valid token pair for a registered user, bypassing login.
    ///
    /// # Panics
    ///
    /// Panics if the email was not registered first.
    #[allow(clippy::panic)] // Test seeding helper
    #[must_use]
    pub fn issue_session(&self, email: &str) -> TokenPair {
        let mut inner = self.inner.lock().unwrap();
        assert!(
            inner.users.contains_key(email),
            "issue_session for unregistered user {email}"
        );
        inner.mint_tokens(email)
    }

    /// Make one endpoint fail with [`ApiError::Api`] until cleared.
    ///
    /// Endpoint names: `ingredients`, `login`, `register`, `logout`,
    /// `refresh`, `user`, `update_user`, `orders`, `feed`,
    /// `profile_orders`, `order_by_number`, `forgot_password`,
    /// `reset_password`.
    pub fn fail_endpoint(&self, endpoint: &str, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .insert(endpoint.to_string(), message.to_string());
    }

    /// Clear an injected failure.
    pub fn clear_failure(&self, endpoint: &str) {
        self.inner.lock().unwrap().failures.remove(endpoint);
    }

    /// Seed the public feed.
    pub fn set_feed(&self, orders: Vec<Order>, total: u64, total_today: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.feed_orders = orders;
        inner.feed_total = total;
        inner.feed_total_today = total_today;
    }

    /// Seed the profile order history.
    pub fn set_profile_orders(&self, orders: Vec<Order>) {
        self.inner.lock().unwrap().profile_orders = orders;
    }

    /// Compositions submitted through `submit_order`, in order.
    #[must_use]
    pub fn submitted_orders(&self) -> Vec<Vec<IngredientId>> {
        self.inner.lock().unwrap().submitted.clone()
    }

    /// Emails that requested a password reset, in order.
    #[must_use]
    pub fn password_reset_requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().password_reset_requests.clone()
    }

    fn failure(&self, endpoint: &str) -> Option<ApiError> {
        self.inner
            .lock()
            .unwrap()
            .failures
            .get(endpoint)
            .map(|message| ApiError::Api {
                message: message.clone(),
            })
    }
}

impl Inner {
    fn mint_tokens(&mut self, email: &str) -> TokenPair {
        self.next_token += 1;
        let pair = TokenPair {
            access_token: format!("access-{}", self.next_token),
            refresh_token: format!("refresh-{}", self.next_token),
        };
        self.access_tokens
            .insert(pair.access_token.clone(), email.to_string());
        self.refresh_tokens
            .insert(pair.refresh_token.clone(), email.to_string());
        pair
    }

    fn user_for_access_token(&self, token: &str) -> Result<User, ApiError> {
        let email = self
            .access_tokens
            .get(token)
            .ok_or(ApiError::Unauthorized)?;
        self.users
            .get(email)
            .map(|r| r.user.clone())
            .ok_or(ApiError::Unauthorized)
    }
}

impl Default for MockBurgerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl BurgerApi for MockBurgerApi {
    async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        if let Some(error) = self.failure("ingredients") {
            return Err(error);
        }
        Ok(self.inner.lock().unwrap().ingredients.clone())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, ApiError> {
        if let Some(error) = self.failure("user") {
            return Err(error);
        }
        self.inner.lock().unwrap().user_for_access_token(access_token)
    }

    async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<User, ApiError> {
        if let Some(error) = self.failure("update_user") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        let email = inner
            .access_tokens
            .get(access_token)
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        let registered = inner.users.get_mut(&email).ok_or(ApiError::Unauthorized)?;

        if let Some(name) = &update.name {
            registered.user.name.clone_from(name);
        }
        if let Some(new_email) = &update.email {
            registered.user.email.clone_from(new_email);
        }
        if let Some(password) = &update.password {
            registered.password.clone_from(password);
        }
        let user = registered.user.clone();

        // Re-key if the email changed
        if user.email != email {
            let entry = inner.users.remove(&email).ok_or(ApiError::Unauthorized)?;
            inner.users.insert(user.email.clone(), entry);
            for target in inner.access_tokens.values_mut() {
                if *target == email {
                    target.clone_from(&user.email);
                }
            }
            for target in inner.refresh_tokens.values_mut() {
                if *target == email {
                    target.clone_from(&user.email);
                }
            }
        }

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        if let Some(error) = self.failure("login") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        let Some(registered) = inner.users.get(email) else {
            return Err(ApiError::Api {
                message: "email or password are incorrect".to_string(),
            });
        };
        if registered.password != password {
            return Err(ApiError::Api {
                message: "email or password are incorrect".to_string(),
            });
        }

        let user = registered.user.clone();
        let tokens = inner.mint_tokens(email);
        Ok(AuthPayload { user, tokens })
    }

    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError> {
        if let Some(error) = self.failure("register") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.users.contains_key(email) {
            return Err(ApiError::Api {
                message: "User already exists".to_string(),
            });
        }

        let user = User {
            email: email.to_string(),
            name: name.to_string(),
        };
        inner.users.insert(
            email.to_string(),
            RegisteredUser {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        let tokens = inner.mint_tokens(email);
        Ok(AuthPayload { user, tokens })
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        if let Some(error) = self.failure("logout") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        let Some(email) = inner.refresh_tokens.remove(refresh_token) else {
            return Err(ApiError::Api {
                message: "Token required".to_string(),
            });
        };
        inner.access_tokens.retain(|_, owner| *owner != email);
        Ok(())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        if let Some(error) = self.failure("refresh") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        let Some(email) = inner.refresh_tokens.remove(refresh_token) else {
            return Err(ApiError::Api {
                message: "Token is invalid".to_string(),
            });
        };
        Ok(inner.mint_tokens(&email))
    }

    async fn submit_order(
        &self,
        access_token: &str,
        ingredients: &[IngredientId],
    ) -> Result<OrderConfirmation, ApiError> {
        if let Some(error) = self.failure("orders") {
            return Err(error);
        }

        let mut inner = self.inner.lock().unwrap();
        if !inner.access_tokens.contains_key(access_token) {
            return Err(ApiError::Unauthorized);
        }

        inner.submitted.push(ingredients.to_vec());
        inner.next_order_number += 1;
        Ok(OrderConfirmation {
            number: inner.next_order_number,
            name: "Mock space burger".to_string(),
        })
    }

    async fn fetch_feed(&self) -> Result<FeedSnapshot, ApiError> {
        if let Some(error) = self.failure("feed") {
            return Err(error);
        }

        let inner = self.inner.lock().unwrap();
        Ok(FeedSnapshot {
            orders: inner.feed_orders.clone(),
            total: inner.feed_total,
            total_today: inner.feed_total_today,
        })
    }

    async fn fetch_profile_orders(&self, access_token: &str) -> Result<Vec<Order>, ApiError> {
        if let Some(error) = self.failure("profile_orders") {
            return Err(error);
        }

        let inner = self.inner.lock().unwrap();
        if !inner.access_tokens.contains_key(access_token) {
            return Err(ApiError::Unauthorized);
        }
        Ok(inner.profile_orders.clone())
    }

    async fn fetch_order_by_number(&self, number: u64) -> Result<Order, ApiError> {
        if let Some(error) = self.failure("order_by_number") {
            return Err(error);
        }

        self.inner
            .lock()
            .unwrap()
            .feed_orders
            .iter()
            .find(|order| order.number == number)
            .cloned()
            .ok_or(ApiError::Api {
                message: "Order not found".to_string(),
            })
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        if let Some(error) = self.failure("forgot_password") {
            return Err(error);
        }

        self.inner
            .lock()
            .unwrap()
            .password_reset_requests
            .push(email.to_string());
        Ok(())
    }

    async fn reset_password(&self, _password: &str, token: &str) -> Result<(), ApiError> {
        if let Some(error) = self.failure("reset_password") {
            return Err(error);
        }

        if token.is_empty() {
            return Err(ApiError::Api {
                message: "Invalid reset token".to_string(),
            });
        }
        Ok(())
    }
}
