//! Pure selectors over the state tree.
//!
//! Derived values are recomputed on every read; nothing here caches.

use crate::state::{AppState, CatalogState, ConstructorState, Ingredient, IngredientId, Order};

/// Total price of the assembled burger.
///
/// The bun is counted twice (top and bottom).
#[must_use]
pub fn total_price(constructor: &ConstructorState) -> u64 {
    let bun_price = constructor
        .bun
        .as_ref()
        .map_or(0, |b| b.ingredient.price * 2);

    bun_price
        + constructor
            .ingredients
            .iter()
            .map(|i| i.ingredient.price)
            .sum::<u64>()
}

/// Ordered ingredient id sequence for order submission: `[bun, items..., bun]`.
///
/// Returns `None` when no bun is selected; an order cannot be submitted
/// without a bun.
#[must_use]
pub fn burger_composition(constructor: &ConstructorState) -> Option<Vec<IngredientId>> {
    let bun = constructor.bun.as_ref()?;

    let mut ids = Vec::with_capacity(constructor.ingredients.len() + 2);
    ids.push(bun.ingredient.id.clone());
    ids.extend(constructor.ingredients.iter().map(|i| i.ingredient.id.clone()));
    ids.push(bun.ingredient.id.clone());
    Some(ids)
}

/// Look up a catalog ingredient by id.
#[must_use]
pub fn ingredient_by_id<'a>(
    catalog: &'a CatalogState,
    id: &IngredientId,
) -> Option<&'a Ingredient> {
    catalog.ingredients.iter().find(|i| &i.id == id)
}

/// Price of an order computed from catalog prices.
///
/// Used for feed-sourced orders, which carry no total of their own.
/// Ingredients missing from the catalog contribute nothing.
#[must_use]
pub fn order_total(order: &Order, catalog: &CatalogState) -> u64 {
    order
        .ingredients
        .iter()
        .filter_map(|id| ingredient_by_id(catalog, id))
        .map(|i| i.price)
        .sum()
}

/// Why an order submission would be refused right now, if it would be.
///
/// `None` means a [`crate::actions::AppAction::SubmitOrder`] dispatched
/// against this state will reach the network.
#[must_use]
pub fn submit_refusal(state: &AppState) -> Option<SubmitRefusal> {
    if state.constructor.bun.is_none() {
        return Some(SubmitRefusal::MissingBun);
    }
    if state.constructor.ingredients.is_empty() {
        return Some(SubmitRefusal::NoIngredients);
    }
    if !state.session.is_authenticated {
        return Some(SubmitRefusal::NotAuthenticated);
    }
    if state.order.order_request {
        return Some(SubmitRefusal::AlreadyInFlight);
    }
    None
}

/// Client-side precondition that refuses an order submission.
///
/// Refusals never reach the network and are not persisted as slice errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    /// No bun selected
    MissingBun,
    /// No fillings selected
    NoIngredients,
    /// User is not logged in
    NotAuthenticated,
    /// A submission is already in flight
    AlreadyInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConstructorIngredient, IngredientKind, InstanceId};

    fn ingredient(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
        Ingredient {
            id: IngredientId::new(id),
            name: id.to_string(),
            kind,
            price,
            calories: 100,
            proteins: 10,
            fat: 5,
            carbohydrates: 20,
            image: String::new(),
            image_mobile: String::new(),
            image_large: String::new(),
        }
    }

    fn entry(id: &str, kind: IngredientKind, price: u64) -> ConstructorIngredient {
        ConstructorIngredient {
            ingredient: ingredient(id, kind, price),
            instance_id: InstanceId::new(format!("instance-{id}")),
        }
    }

    #[test]
    fn total_price_counts_the_bun_twice() {
        let constructor = ConstructorState {
            bun: Some(entry("b1", IngredientKind::Bun, 50)),
            ingredients: vec![
                entry("i1", IngredientKind::Main, 10),
                entry("i2", IngredientKind::Sauce, 20),
            ],
        };

        assert_eq!(total_price(&constructor), 130);
    }

    #[test]
    fn total_price_without_bun_sums_ingredients_only() {
        let constructor = ConstructorState {
            bun: None,
            ingredients: vec![entry("i1", IngredientKind::Main, 10)],
        };

        assert_eq!(total_price(&constructor), 10);
    }

    #[test]
    fn composition_brackets_with_the_bun() {
        let constructor = ConstructorState {
            bun: Some(entry("b1", IngredientKind::Bun, 50)),
            ingredients: vec![
                entry("i1", IngredientKind::Main, 10),
                entry("i2", IngredientKind::Sauce, 20),
            ],
        };

        let ids: Vec<String> = burger_composition(&constructor)
            .map(|ids| ids.iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec!["b1", "i1", "i2", "b1"]);
    }

    #[test]
    fn composition_without_bun_is_none() {
        let constructor = ConstructorState {
            bun: None,
            ingredients: vec![entry("i1", IngredientKind::Main, 10)],
        };

        assert!(burger_composition(&constructor).is_none());
    }

    #[test]
    fn submit_refusal_reports_the_first_failed_precondition() {
        let mut state = AppState::default();
        assert_eq!(submit_refusal(&state), Some(SubmitRefusal::MissingBun));

        state.constructor.bun = Some(entry("b1", IngredientKind::Bun, 50));
        assert_eq!(submit_refusal(&state), Some(SubmitRefusal::NoIngredients));

        state
            .constructor
            .ingredients
            .push(entry("i1", IngredientKind::Main, 10));
        assert_eq!(submit_refusal(&state), Some(SubmitRefusal::NotAuthenticated));

        state.session.is_authenticated = true;
        assert_eq!(submit_refusal(&state), None);

        state.order.order_request = true;
        assert_eq!(submit_refusal(&state), Some(SubmitRefusal::AlreadyInFlight));
    }
}
