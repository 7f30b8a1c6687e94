//! Application reducers.
//!
//! This module contains pure reducer functions for the application.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod catalog;
pub mod checkout;
pub mod constructor;
pub mod feed;
pub mod session;

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::providers::{BurgerApi, TokenStore};
use crate::state::AppState;
use stellar_burgers_core::{SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use catalog::CatalogReducer;
pub use checkout::CheckoutReducer;
pub use constructor::ConstructorReducer;
pub use feed::FeedReducer;
pub use session::SessionReducer;

/// Unified application reducer.
///
/// Combines the catalog, constructor, checkout, session, and feed slices
/// into a single reducer. Routes actions to the appropriate sub-reducer
/// based on action type.
#[derive(Debug, Clone)]
pub struct AppReducer<A, T>
where
    A: BurgerApi + Clone + 'static,
    T: TokenStore + Clone + 'static,
{
    catalog: CatalogReducer<A, T>,
    constructor: ConstructorReducer<A, T>,
    checkout: CheckoutReducer<A, T>,
    session: SessionReducer<A, T>,
    feed: FeedReducer<A, T>,
}

impl<A, T> AppReducer<A, T>
where
    A: BurgerApi + Clone + 'static,
    T: TokenStore + Clone + 'static,
{
    /// Create a new unified application reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            catalog: CatalogReducer::new(),
            constructor: ConstructorReducer::new(),
            checkout: CheckoutReducer::new(),
            session: SessionReducer::new(),
            feed: FeedReducer::new(),
        }
    }
}

impl<A, T> Default for AppReducer<A, T>
where
    A: BurgerApi + Clone + 'static,
    T: TokenStore + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for AppReducer<A, T>
where
    A: BurgerApi + Clone + 'static,
    T: TokenStore + Clone + 'static,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<A, T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Route to appropriate sub-reducer based on action type
        match action {
            // Catalog actions
            AppAction::FetchIngredients
            | AppAction::IngredientsLoaded { .. }
            | AppAction::IngredientsFailed { .. } => self.catalog.reduce(state, action, env),

            // Constructor actions
            AppAction::AddIngredient(_)
            | AppAction::RemoveIngredient(_)
            | AppAction::MoveItem { .. }
            | AppAction::ClearConstructor => self.constructor.reduce(state, action, env),

            // Checkout and order submission actions
            AppAction::OpenCheckout
            | AppAction::SetDelivery(_)
            | AppAction::SetContacts(_)
            | AppAction::NextStep
            | AppAction::PrevStep
            | AppAction::SubmitOrder { .. }
            | AppAction::OrderAccepted { .. }
            | AppAction::OrderFailed { .. }
            | AppAction::ClearOrderDetails => self.checkout.reduce(state, action, env),

            // Session actions
            AppAction::CheckAuth
            | AppAction::AuthChecked { .. }
            | AppAction::Login { .. }
            | AppAction::LoginSucceeded { .. }
            | AppAction::LoginFailed { .. }
            | AppAction::Register { .. }
            | AppAction::RegisterSucceeded { .. }
            | AppAction::RegisterFailed { .. }
            | AppAction::Logout
            | AppAction::LogoutCompleted
            | AppAction::UpdateUser(_)
            | AppAction::UserUpdated { .. }
            | AppAction::UserUpdateFailed { .. }
            | AppAction::ForgotPassword { .. }
            | AppAction::ResetPassword { .. }
            | AppAction::PasswordResetSucceeded
            | AppAction::PasswordResetFailed { .. } => self.session.reduce(state, action, env),

            // Feed and order history actions
            AppAction::FetchFeed
            | AppAction::FeedLoaded { .. }
            | AppAction::FeedFailed { .. }
            | AppAction::FetchProfileOrders
            | AppAction::ProfileOrdersLoaded { .. }
            | AppAction::ProfileOrdersFailed { .. }
            | AppAction::FetchOrderByNumber { .. }
            | AppAction::OrderByNumberLoaded { .. }
            | AppAction::OrderByNumberFailed { .. } => self.feed.reduce(state, action, env),
        }
    }
}
