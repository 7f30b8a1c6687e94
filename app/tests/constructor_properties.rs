//! Property tests for the burger constructor invariants.
//!
//! The constructor reducer is synchronous, so these drive it directly
//! without a store. Effects are produced but never executed.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use proptest::prelude::*;
use std::sync::Arc;
use stellar_burgers_app::{
    AppAction, AppEnvironment, AppReducer, AppState, UuidGenerator,
    mocks::{MockBurgerApi, MockTokenStore},
    state::{Ingredient, IngredientId, IngredientKind, InstanceId, MoveDirection},
};
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_testing::{InMemoryEventBus, test_clock};

fn test_env() -> AppEnvironment<MockBurgerApi, MockTokenStore> {
    AppEnvironment::new(
        MockBurgerApi::new(),
        MockTokenStore::new(),
        Arc::new(test_clock()),
        Arc::new(UuidGenerator),
        Arc::new(InMemoryEventBus::new()),
    )
}

fn ingredient(id: String, kind: IngredientKind, price: u64) -> Ingredient {
    Ingredient {
        name: format!("Ingredient {id}"),
        id: IngredientId::new(id),
        kind,
        price,
        calories: 10,
        proteins: 1,
        fat: 1,
        carbohydrates: 1,
        image: String::new(),
        image_mobile: String::new(),
        image_large: String::new(),
    }
}

fn arb_kind() -> impl Strategy<Value = IngredientKind> {
    prop_oneof![
        Just(IngredientKind::Bun),
        Just(IngredientKind::Main),
        Just(IngredientKind::Sauce),
    ]
}

fn arb_filling_kind() -> impl Strategy<Value = IngredientKind> {
    prop_oneof![Just(IngredientKind::Main), Just(IngredientKind::Sauce)]
}

fn arb_ingredient() -> impl Strategy<Value = Ingredient> {
    ("[a-z][a-z0-9]{2,7}", arb_kind(), 1u64..500)
        .prop_map(|(id, kind, price)| ingredient(id, kind, price))
}

fn arb_filling() -> impl Strategy<Value = Ingredient> {
    ("[a-z][a-z0-9]{2,7}", arb_filling_kind(), 1u64..500)
        .prop_map(|(id, kind, price)| ingredient(id, kind, price))
}

fn arb_direction() -> impl Strategy<Value = MoveDirection> {
    prop_oneof![Just(MoveDirection::Up), Just(MoveDirection::Down)]
}

/// Build a state by adding every ingredient through the reducer.
fn state_with(
    reducer: &AppReducer<MockBurgerApi, MockTokenStore>,
    env: &AppEnvironment<MockBurgerApi, MockTokenStore>,
    items: Vec<Ingredient>,
) -> AppState {
    let mut state = AppState::default();
    for item in items {
        let _ = reducer.reduce(&mut state, AppAction::AddIngredient(item), env);
    }
    state
}

fn filling_order(state: &AppState) -> Vec<String> {
    state
        .constructor
        .ingredients
        .iter()
        .map(|entry| entry.instance_id.as_str().to_string())
        .collect()
}

proptest! {
    /// No sequence of additions ever yields two buns, and buns never leak
    /// into the filling list.
    #[test]
    fn at_most_one_bun_after_any_addition_sequence(items in prop::collection::vec(arb_ingredient(), 0..12)) {
        let reducer = AppReducer::new();
        let env = test_env();

        let last_bun = items
            .iter()
            .filter(|i| i.kind == IngredientKind::Bun)
            .next_back()
            .cloned();
        let filling_count = items.iter().filter(|i| i.kind != IngredientKind::Bun).count();

        let state = state_with(&reducer, &env, items);

        prop_assert_eq!(
            state.constructor.bun.as_ref().map(|b| b.ingredient.id.clone()),
            last_bun.map(|b| b.id)
        );
        prop_assert_eq!(state.constructor.ingredients.len(), filling_count);
        prop_assert!(
            state
                .constructor
                .ingredients
                .iter()
                .all(|entry| entry.ingredient.kind != IngredientKind::Bun)
        );
    }

    /// Reordering only permutes; it never adds, drops, or duplicates entries.
    #[test]
    fn moves_preserve_the_set_of_entries(
        items in prop::collection::vec(arb_filling(), 0..8),
        ops in prop::collection::vec((0usize..10, arb_direction()), 0..16),
    ) {
        let reducer = AppReducer::new();
        let env = test_env();
        let mut state = state_with(&reducer, &env, items);

        let mut expected = filling_order(&state);
        expected.sort();

        for (index_from, direction) in ops {
            let _ = reducer.reduce(&mut state, AppAction::MoveItem { index_from, direction }, &env);
        }

        let mut actual = filling_order(&state);
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    /// Moving an entry down and then back up is an identity.
    #[test]
    fn move_down_then_up_restores_the_order(
        items in prop::collection::vec(arb_filling(), 2..8),
        seed in 0usize..8,
    ) {
        let reducer = AppReducer::new();
        let env = test_env();
        let mut state = state_with(&reducer, &env, items);

        let index = seed % (state.constructor.ingredients.len() - 1);
        let before = filling_order(&state);

        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: index, direction: MoveDirection::Down },
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: index + 1, direction: MoveDirection::Up },
            &env,
        );

        prop_assert_eq!(filling_order(&state), before);
    }

    /// Out-of-range or boundary moves leave the order untouched.
    #[test]
    fn boundary_moves_are_noops(items in prop::collection::vec(arb_filling(), 1..8)) {
        let reducer = AppReducer::new();
        let env = test_env();
        let mut state = state_with(&reducer, &env, items);

        let before = filling_order(&state);
        let len = before.len();

        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: 0, direction: MoveDirection::Up },
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: len - 1, direction: MoveDirection::Down },
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: len, direction: MoveDirection::Up },
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::MoveItem { index_from: len + 7, direction: MoveDirection::Down },
            &env,
        );

        prop_assert_eq!(filling_order(&state), before);
    }

    /// Removing an instance id that is not present changes nothing; removing
    /// a present one removes exactly that entry.
    #[test]
    fn removal_targets_exactly_one_entry(
        items in prop::collection::vec(arb_filling(), 1..8),
        seed in 0usize..8,
    ) {
        let reducer = AppReducer::new();
        let env = test_env();
        let mut state = state_with(&reducer, &env, items);

        let before = filling_order(&state);
        let _ = reducer.reduce(
            &mut state,
            AppAction::RemoveIngredient(InstanceId::new("not-a-real-instance")),
            &env,
        );
        prop_assert_eq!(filling_order(&state), before.clone());

        let victim = before[seed % before.len()].clone();
        let _ = reducer.reduce(
            &mut state,
            AppAction::RemoveIngredient(InstanceId::new(victim.clone())),
            &env,
        );

        let after = filling_order(&state);
        prop_assert_eq!(after.len(), before.len() - 1);
        prop_assert!(!after.contains(&victim));
    }

    /// Clearing always lands on the empty constructor, whatever came before.
    #[test]
    fn clear_always_resets_to_empty(items in prop::collection::vec(arb_ingredient(), 0..10)) {
        let reducer = AppReducer::new();
        let env = test_env();
        let mut state = state_with(&reducer, &env, items);

        let _ = reducer.reduce(&mut state, AppAction::ClearConstructor, &env);

        prop_assert!(state.constructor.bun.is_none());
        prop_assert!(state.constructor.ingredients.is_empty());
    }
}
