//! Application shell.
//!
//! [`AppShell`] is the composition root: it owns the store and exposes the
//! orchestration API the presentation layer calls. Request/response flows
//! (login, order submission) are built on the store's action broadcast, so
//! callers get the terminal outcome without polling state.

use crate::actions::AppAction;
use crate::config::AppConfig;
use crate::environment::AppEnvironment;
use crate::error::{AppError, Result};
use crate::guard::{self, RouteAccess, RouteRule};
use crate::providers::{BurgerApi, TokenStore};
use crate::reducers::AppReducer;
use crate::selectors;
use crate::state::{AppState, Order, User};
use std::time::Duration;
use stellar_burgers_runtime::Store;

/// The application shell.
///
/// # Example
///
/// ```ignore
/// let shell = AppShell::new(AppConfig::default(), environment);
/// shell.bootstrap().await?;
///
/// shell.send(AppAction::AddIngredient(bun)).await?;
/// let order = shell.submit_order("/checkout").await?;
/// ```
pub struct AppShell<A, T>
where
    A: BurgerApi + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    store: Store<AppState, AppAction, AppEnvironment<A, T>, AppReducer<A, T>>,
    config: AppConfig,
}

impl<A, T> AppShell<A, T>
where
    A: BurgerApi + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    /// Create a shell over an empty state tree.
    #[must_use]
    pub fn new(config: AppConfig, environment: AppEnvironment<A, T>) -> Self {
        let store = Store::with_broadcast_capacity(
            AppState::default(),
            AppReducer::new(),
            environment,
            config.broadcast_capacity,
        );
        Self { store, config }
    }

    /// Boot sequence: start the catalog fetch and run the auth check.
    ///
    /// Returns once the auth check has settled; the catalog fetch continues
    /// in the background.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down or the auth
    /// check does not settle within the configured timeout.
    pub async fn bootstrap(&self) -> Result<()> {
        self.store.send(AppAction::FetchIngredients).await?;
        self.store
            .send_and_wait_for(
                AppAction::CheckAuth,
                |action| matches!(action, AppAction::AuthChecked { .. }),
                self.config.auth_timeout,
            )
            .await?;
        Ok(())
    }

    /// Submit the assembled burger and wait for the outcome.
    ///
    /// `from` is the route the user is on; unauthenticated attempts publish
    /// a login-required event carrying it so the host can redirect back
    /// after login, matching the guard's redirect.
    ///
    /// Refused submissions (no bun, no ingredients, not logged in, already
    /// in flight) return immediately without any network call; the refused
    /// dispatch still reaches the reducer so unauthenticated attempts
    /// publish their login-redirect event.
    ///
    /// # Errors
    ///
    /// - [`AppError::SubmitRefused`]: a precondition failed client-side
    /// - [`AppError::Rejected`]: the API refused the order
    /// - [`AppError::Store`]: the store is shutting down or timed out
    pub async fn submit_order(&self, from: &str) -> Result<Order> {
        // Checked here as well as in the reducer: a refused submission
        // produces no terminal action to wait for.
        if let Some(refusal) = self.store.state(selectors::submit_refusal).await {
            self.store
                .send(AppAction::SubmitOrder {
                    from: from.to_string(),
                })
                .await?;
            return Err(AppError::SubmitRefused(refusal));
        }

        let outcome = self
            .store
            .send_and_wait_for(
                AppAction::SubmitOrder {
                    from: from.to_string(),
                },
                |action| {
                    matches!(
                        action,
                        AppAction::OrderAccepted { .. } | AppAction::OrderFailed { .. }
                    )
                },
                self.config.submit_timeout,
            )
            .await?;

        match outcome {
            AppAction::OrderAccepted { order } => Ok(order),
            AppAction::OrderFailed { message } => Err(AppError::Rejected { message }),
            _ => Err(AppError::Store(
                stellar_burgers_runtime::StoreError::ChannelClosed,
            )),
        }
    }

    /// Log in and wait for the outcome.
    ///
    /// # Errors
    ///
    /// - [`AppError::Rejected`]: the API refused the credentials
    /// - [`AppError::Store`]: the store is shutting down or timed out
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let outcome = self
            .store
            .send_and_wait_for(
                AppAction::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                |action| {
                    matches!(
                        action,
                        AppAction::LoginSucceeded { .. } | AppAction::LoginFailed { .. }
                    )
                },
                self.config.auth_timeout,
            )
            .await?;

        match outcome {
            AppAction::LoginSucceeded { user } => Ok(user),
            AppAction::LoginFailed { message } => Err(AppError::Rejected { message }),
            _ => Err(AppError::Store(
                stellar_burgers_runtime::StoreError::ChannelClosed,
            )),
        }
    }

    /// Register a new account and wait for the outcome.
    ///
    /// # Errors
    ///
    /// - [`AppError::Rejected`]: the API refused the registration
    /// - [`AppError::Store`]: the store is shutting down or timed out
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User> {
        let outcome = self
            .store
            .send_and_wait_for(
                AppAction::Register {
                    email: email.to_string(),
                    name: name.to_string(),
                    password: password.to_string(),
                },
                |action| {
                    matches!(
                        action,
                        AppAction::RegisterSucceeded { .. } | AppAction::RegisterFailed { .. }
                    )
                },
                self.config.auth_timeout,
            )
            .await?;

        match outcome {
            AppAction::RegisterSucceeded { user } => Ok(user),
            AppAction::RegisterFailed { message } => Err(AppError::Rejected { message }),
            _ => Err(AppError::Store(
                stellar_burgers_runtime::StoreError::ChannelClosed,
            )),
        }
    }

    /// Log out and wait until tokens are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down or timed out.
    pub async fn logout(&self) -> Result<()> {
        self.store
            .send_and_wait_for(
                AppAction::Logout,
                |action| matches!(action, AppAction::LogoutCompleted),
                self.config.auth_timeout,
            )
            .await?;
        Ok(())
    }

    /// Dispatch any action without waiting for its effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down.
    pub async fn send(&self, action: AppAction) -> Result<stellar_burgers_runtime::EffectHandle> {
        Ok(self.store.send(action).await?)
    }

    /// Read current state via a closure.
    pub async fn state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        self.store.state(f).await
    }

    /// Classify a route visit against the current session.
    pub async fn route_access(&self, rule: RouteRule, path: &str) -> RouteAccess {
        self.store
            .state(|s| guard::route_access(rule, path, &s.session))
            .await
    }

    /// The underlying store, for subscribing to actions or advanced use.
    #[must_use]
    pub const fn store(
        &self,
    ) -> &Store<AppState, AppAction, AppEnvironment<A, T>, AppReducer<A, T>> {
        &self.store
    }

    /// Gracefully shut down, waiting for in-flight effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if effects are still running after
    /// `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<()> {
        Ok(self.store.shutdown(timeout).await?)
    }
}
