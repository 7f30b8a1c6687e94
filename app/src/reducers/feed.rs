//! Feed and order history reducer.
//!
//! Handles the public feed, the logged-in user's order history, and the
//! order-by-number lookup behind the order-info view. All three follow the
//! same pending/fulfilled/rejected discipline.

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::events::{self, AppEvent};
use crate::providers::{BurgerApi, TokenStore};
use crate::state::AppState;
use stellar_burgers_core::effect::Effect;
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_core::{SmallVec, smallvec};

/// Feed reducer.
#[derive(Debug, Clone)]
pub struct FeedReducer<A, T> {
    _phantom: std::marker::PhantomData<(A, T)>,
}

impl<A, T> FeedReducer<A, T> {
    /// Create a new feed reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, T> Default for FeedReducer<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for FeedReducer<A, T>
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
        match action {
            AppAction::FetchFeed => {
                state.feed.is_loading = true;
                state.feed.error = None;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.fetch_feed().await {
                        Ok(snapshot) => Some(AppAction::FeedLoaded {
                            orders: snapshot.orders,
                            total: snapshot.total,
                            total_today: snapshot.total_today,
                        }),
                        Err(error) => Some(AppAction::FeedFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::FeedLoaded {
                orders,
                total,
                total_today,
            } => {
                state.feed.is_loading = false;
                state.feed.error = None;
                state.feed.orders = orders;
                state.feed.total = total;
                state.feed.total_today = total_today;

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::FeedLoaded {
                        count: state.feed.orders.len(),
                    },
                    env.clock.now(),
                )]
            },

            AppAction::FeedFailed { message } => {
                state.feed.is_loading = false;
                state.feed.error = Some(message);
                smallvec![Effect::None]
            },

            AppAction::FetchProfileOrders => {
                state.feed.is_loading = true;
                state.feed.error = None;

                let api = env.api.clone();
                let tokens = env.tokens.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let access = match tokens.access_token().await {
                        Ok(Some(token)) => token,
                        Ok(None) => {
                            return Some(AppAction::ProfileOrdersFailed {
                                message: "Missing access token".to_string(),
                            });
                        },
                        Err(error) => {
                            return Some(AppAction::ProfileOrdersFailed {
                                message: error.to_string(),
                            });
                        },
                    };

                    match api.fetch_profile_orders(&access).await {
                        Ok(orders) => Some(AppAction::ProfileOrdersLoaded { orders }),
                        Err(error) => Some(AppAction::ProfileOrdersFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::ProfileOrdersLoaded { orders } => {
                state.feed.is_loading = false;
                state.feed.error = None;
                state.feed.profile_orders = orders;
                smallvec![Effect::None]
            },

            AppAction::ProfileOrdersFailed { message } => {
                state.feed.is_loading = false;
                state.feed.error = Some(message);
                smallvec![Effect::None]
            },

            AppAction::FetchOrderByNumber { number } => {
                state.feed.current_order = None;
                state.feed.error = None;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.fetch_order_by_number(number).await {
                        Ok(order) => Some(AppAction::OrderByNumberLoaded { order }),
                        Err(error) => Some(AppAction::OrderByNumberFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::OrderByNumberLoaded { order } => {
                state.feed.current_order = Some(order);
                smallvec![Effect::None]
            },

            AppAction::OrderByNumberFailed { message } => {
                state.feed.error = Some(message);
                smallvec![Effect::None]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
