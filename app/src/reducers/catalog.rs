//! Ingredient catalog reducer.
//!
//! Fetches the catalog once and keeps the loading flag raised until a fetch
//! succeeds: the application never renders a half-loaded catalog.

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::events::{self, AppEvent};
use crate::providers::{BurgerApi, TokenStore};
use crate::state::AppState;
use stellar_burgers_core::effect::Effect;
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_core::{SmallVec, smallvec};

/// Catalog reducer.
#[derive(Debug, Clone)]
pub struct CatalogReducer<A, T> {
    _phantom: std::marker::PhantomData<(A, T)>,
}

impl<A, T> CatalogReducer<A, T> {
    /// Create a new catalog reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, T> Default for CatalogReducer<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for CatalogReducer<A, T>
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
            AppAction::FetchIngredients => {
                state.catalog.is_loading = true;
                state.catalog.error = None;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.fetch_ingredients().await {
                        Ok(ingredients) => Some(AppAction::IngredientsLoaded { ingredients }),
                        Err(error) => {
                            tracing::warn!(%error, "catalog fetch failed");
                            Some(AppAction::IngredientsFailed {
                                message: error.to_string(),
                            })
                        },
                    }
                }))]
            },

            AppAction::IngredientsLoaded { ingredients } => {
                state.catalog.is_loading = false;
                state.catalog.error = None;
                state.catalog.ingredients = ingredients;

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::IngredientsLoaded {
                        count: state.catalog.ingredients.len(),
                    },
                    env.clock.now(),
                )]
            },

            AppAction::IngredientsFailed { message } => {
                // Loading stays raised: no half-loaded catalog is ever shown.
                state.catalog.error = Some(message.clone());

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::IngredientsFailed { message },
                    env.clock.now(),
                )]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
