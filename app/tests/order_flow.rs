//! Integration tests for the order submission flow.
//!
//! Drives a real store through the shell with in-memory providers: login,
//! burger assembly, submission, and the published change events.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;
use stellar_burgers_app::{
    AppAction, AppConfig, AppEnvironment, AppError, AppShell, UuidGenerator,
    mocks::{MockBurgerApi, MockTokenStore},
    state::{CheckoutStep, Ingredient, IngredientId, IngredientKind, OrderStatus},
};
use stellar_burgers_core::event_bus::BusEvent;
use stellar_burgers_testing::{InMemoryEventBus, test_clock};

fn ingredient(id: &str, name: &str, kind: IngredientKind, price: u64) -> Ingredient {
    Ingredient {
        id: IngredientId::new(id),
        name: name.to_string(),
        kind,
        price,
        calories: 100,
        proteins: 10,
        fat: 5,
        carbohydrates: 20,
        image: format!("https://img.example/{id}.png"),
        image_mobile: format!("https://img.example/{id}-mobile.png"),
        image_large: format!("https://img.example/{id}-large.png"),
    }
}

fn seeded_catalog() -> Vec<Ingredient> {
    vec![
        ingredient("b1", "Fluorescent bun", IngredientKind::Bun, 50),
        ingredient("i1", "Space cutlet", IngredientKind::Main, 20),
        ingredient("i2", "Galactic sauce", IngredientKind::Sauce, 10),
    ]
}

struct Harness {
    shell: AppShell<MockBurgerApi, MockTokenStore>,
    api: MockBurgerApi,
    bus: Arc<InMemoryEventBus>,
}

fn harness() -> Harness {
    let api = MockBurgerApi::new();
    api.add_ingredients(seeded_catalog());
    api.register_user("user@example.com", "User", "secret");

    let tokens = MockTokenStore::new();
    let bus = Arc::new(InMemoryEventBus::new());
    let env = AppEnvironment::new(
        api.clone(),
        tokens.clone(),
        Arc::new(test_clock()),
        Arc::new(UuidGenerator),
        bus.clone(),
    );

    Harness {
        shell: AppShell::new(AppConfig::default(), env),
        api,
        bus,
    }
}

/// Effects publish asynchronously after the terminal action, so event
/// assertions poll briefly.
async fn wait_for_event(bus: &InMemoryEventBus, topic: &str, event_type: &str) -> BusEvent {
    for _ in 0..100 {
        if let Some(event) = bus
            .events_for_topic(topic)
            .await
            .into_iter()
            .find(|event| event.event_type == event_type)
        {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("event {event_type} never published on {topic}");
}

async fn assemble_burger(harness: &Harness) {
    let catalog = seeded_catalog();
    for item in catalog {
        harness
            .shell
            .send(AppAction::AddIngredient(item))
            .await
            .unwrap()
            .wait()
            .await;
    }
}

#[tokio::test]
async fn submitted_order_clears_the_constructor_and_reaches_success() {
    let harness = harness();
    harness.shell.bootstrap().await.unwrap();
    harness.shell.login("user@example.com", "secret").await.unwrap();

    assemble_burger(&harness).await;

    let total = harness
        .shell
        .state(|s| stellar_burgers_app::selectors::total_price(&s.constructor))
        .await;
    assert_eq!(total, 130);

    let order = harness.shell.submit_order("/").await.unwrap();
    assert_eq!(order.number, 1001);
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.total, 130);
    assert_eq!(
        order.ingredients,
        vec![
            IngredientId::new("b1"),
            IngredientId::new("i1"),
            IngredientId::new("i2"),
            IngredientId::new("b1"),
        ]
    );

    // The mock saw exactly one submission with the bracketed composition
    assert_eq!(harness.api.submitted_orders(), vec![order.ingredients.clone()]);

    harness
        .shell
        .state(|s| {
            assert!(s.constructor.bun.is_none());
            assert!(s.constructor.ingredients.is_empty());
            assert_eq!(s.checkout.step, CheckoutStep::Success);
            assert!(!s.order.order_request);
            assert_eq!(s.order.order.as_ref().unwrap().number, 1001);
        })
        .await;

    let accepted = wait_for_event(&harness.bus, "order-events", "order-accepted").await;
    assert_eq!(accepted.payload["number"], 1001);
    wait_for_event(&harness.bus, "constructor-events", "constructor-cleared").await;
}

#[tokio::test]
async fn rejected_order_preserves_the_burger_for_retry() {
    let harness = harness();
    harness.shell.bootstrap().await.unwrap();
    harness.shell.login("user@example.com", "secret").await.unwrap();
    assemble_burger(&harness).await;

    harness.api.fail_endpoint("orders", "Order service unavailable");

    let result = harness.shell.submit_order("/").await;
    match result {
        Err(AppError::Rejected { message }) => {
            assert_eq!(message, "Order service unavailable");
        },
        other => panic!("expected rejection, got {other:?}"),
    }

    harness
        .shell
        .state(|s| {
            // Burger and checkout data survive so the user can retry
            assert!(s.constructor.bun.is_some());
            assert_eq!(s.constructor.ingredients.len(), 2);
            assert!(!s.order.order_request);
            assert_eq!(s.order.error.as_deref(), Some("Order service unavailable"));
            assert_ne!(s.checkout.step, CheckoutStep::Success);
        })
        .await;

    let failed = wait_for_event(&harness.bus, "order-events", "order-failed").await;
    assert_eq!(failed.payload["message"], "Order service unavailable");

    // Retry succeeds once the outage clears
    harness.api.clear_failure("orders");
    let order = harness.shell.submit_order("/").await.unwrap();
    assert_eq!(order.number, 1001);
}

#[tokio::test]
async fn unauthenticated_submission_is_refused_without_a_network_call() {
    let harness = harness();
    harness.shell.bootstrap().await.unwrap();
    assemble_burger(&harness).await;

    let result = harness.shell.submit_order("/checkout").await;
    assert!(matches!(result, Err(AppError::SubmitRefused(_))));
    assert!(harness.api.submitted_orders().is_empty());

    // The refused dispatch still publishes the login redirect, carrying the
    // route the submission came from so the host can return the user there
    let required = wait_for_event(&harness.bus, "session-events", "login-required").await;
    assert_eq!(required.payload["from"], "/checkout");
}

#[tokio::test]
async fn empty_constructor_submission_is_refused() {
    let harness = harness();
    harness.shell.bootstrap().await.unwrap();
    harness.shell.login("user@example.com", "secret").await.unwrap();

    let result = harness.shell.submit_order("/").await;
    assert!(matches!(result, Err(AppError::SubmitRefused(_))));
    assert!(harness.api.submitted_orders().is_empty());
}

#[tokio::test]
async fn clearing_order_details_resets_the_checkout_for_the_next_burger() {
    let harness = harness();
    harness.shell.bootstrap().await.unwrap();
    harness.shell.login("user@example.com", "secret").await.unwrap();
    assemble_burger(&harness).await;
    harness.shell.submit_order("/").await.unwrap();

    harness
        .shell
        .send(AppAction::ClearOrderDetails)
        .await
        .unwrap()
        .wait()
        .await;

    harness
        .shell
        .state(|s| {
            assert!(s.order.order.is_none());
            assert_eq!(s.checkout.step, CheckoutStep::Cart);
        })
        .await;
}
