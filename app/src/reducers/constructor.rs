//! Burger constructor reducer.
//!
//! State machine over [`ConstructorState`]: add, remove, reorder, clear.
//! None of the operations fail; invalid reorder requests are defined no-ops.
//!
//! # Invariants
//!
//! - At most one bun; adding a bun replaces the current one
//! - `ingredients` never contains `Bun` items
//! - `ingredients` order is the build order submitted to the API

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::events::{self, AppEvent};
use crate::providers::{BurgerApi, TokenStore};
use crate::selectors;
use crate::state::{
    AppState, ConstructorIngredient, ConstructorState, IngredientKind, InstanceId, MoveDirection,
};
use stellar_burgers_core::effect::Effect;
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_core::{SmallVec, smallvec};

/// Constructor reducer.
#[derive(Debug, Clone)]
pub struct ConstructorReducer<A, T> {
    _phantom: std::marker::PhantomData<(A, T)>,
}

impl<A, T> ConstructorReducer<A, T> {
    /// Create a new constructor reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, T> Default for ConstructorReducer<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for ConstructorReducer<A, T>
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
            // ═══════════════════════════════════════════════════════════════
            // AddIngredient: bun replaces, everything else appends
            // ═══════════════════════════════════════════════════════════════
            AppAction::AddIngredient(ingredient) => {
                let entry = ConstructorIngredient {
                    instance_id: InstanceId::new(env.ids.next_id()),
                    ingredient,
                };

                if entry.ingredient.kind == IngredientKind::Bun {
                    state.constructor.bun = Some(entry);
                } else {
                    state.constructor.ingredients.push(entry);
                }

                smallvec![changed_event(state, env)]
            },

            // ═══════════════════════════════════════════════════════════════
            // RemoveIngredient: silent no-op if absent; never touches the bun
            // ═══════════════════════════════════════════════════════════════
            AppAction::RemoveIngredient(instance_id) => {
                let before = state.constructor.ingredients.len();
                state
                    .constructor
                    .ingredients
                    .retain(|entry| entry.instance_id != instance_id);

                if state.constructor.ingredients.len() == before {
                    tracing::debug!(%instance_id, "remove for unknown instance id ignored");
                    return smallvec![Effect::None];
                }

                smallvec![changed_event(state, env)]
            },

            // ═══════════════════════════════════════════════════════════════
            // MoveItem: swap with the neighbor; out-of-range is a no-op
            // ═══════════════════════════════════════════════════════════════
            AppAction::MoveItem {
                index_from,
                direction,
            } => {
                let len = state.constructor.ingredients.len();
                let target = match direction {
                    MoveDirection::Up => index_from.checked_sub(1),
                    MoveDirection::Down => index_from.checked_add(1).filter(|t| *t < len),
                };

                let Some(target) = target.filter(|_| index_from < len) else {
                    tracing::debug!(index_from, ?direction, "out-of-range move ignored");
                    return smallvec![Effect::None];
                };

                state.constructor.ingredients.swap(index_from, target);
                smallvec![changed_event(state, env)]
            },

            // ═══════════════════════════════════════════════════════════════
            // ClearConstructor: back to empty
            // ═══════════════════════════════════════════════════════════════
            AppAction::ClearConstructor => {
                state.constructor = ConstructorState::default();
                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::ConstructorCleared,
                    env.clock.now(),
                )]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}

/// Publish effect describing the new composition.
fn changed_event<A, T>(state: &AppState, env: &AppEnvironment<A, T>) -> Effect<AppAction>
where
    A: BurgerApi + Clone,
    T: TokenStore + Clone,
{
    events::publish(
        &env.event_bus,
        AppEvent::ConstructorChanged {
            total_price: selectors::total_price(&state.constructor),
            item_count: state.constructor.ingredients.len(),
        },
        env.clock.now(),
    )
}
