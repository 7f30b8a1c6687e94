//! Given-When-Then harness for reducer tests.
//!
//! Reducers are pure: hand them a state and an action and they mutate the
//! state and return effect descriptions without executing anything. The
//! harness wraps that call so a test reads as a scenario, and the
//! [`assertions`] module inspects the returned effect list without running
//! the effects.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use stellar_burgers_core::{effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;
type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Scenario-style test runner for a single reducer.
///
/// Actions queued with [`when_action`](Self::when_action) are reduced in
/// order against the same state; effect assertions see the effects of the
/// final action, which is the one the scenario is about.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(ConstructorReducer::new())
///     .with_env(test_environment())
///     .given_state(AppState::default())
///     .when_action(AppAction::AddIngredient(krator_bun()))
///     .when_action(AppAction::AddIngredient(fluorescent_bun()))
///     .then_state(|state| {
///         assert_eq!(bun_name(state), Some("Fluorescent bun"));
///     })
///     .then_effects(|effects| {
///         assertions::assert_publishes_to_topic(effects, "constructor-events");
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    state: Option<S>,
    actions: Vec<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a scenario around `reducer`.
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            state: None,
            actions: Vec::new(),
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Provide the environment the reducer sees.
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Given: the state the scenario starts from.
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// When: queue an action. May be called repeatedly to build up a
    /// sequence; only the last action's effects reach the effect checks.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// When: queue several actions at once.
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Then: assert on the state after every queued action has reduced.
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Then: assert on the effects returned by the final action.
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduce the queued actions and run every assertion.
    ///
    /// # Panics
    ///
    /// Panics if the state, environment, or at least one action is missing,
    /// or if any assertion fails.
    #[allow(clippy::expect_used)] // Missing setup is a test-authoring error
    pub fn run(self) {
        let mut state = self.state.expect("given_state() was never called");
        let env = self.environment.expect("with_env() was never called");
        assert!(
            !self.actions.is_empty(),
            "when_action() was never called"
        );

        let mut last_effects = None;
        for action in self.actions {
            last_effects = Some(self.reducer.reduce(&mut state, action, &env));
        }

        for check in self.state_checks {
            check(&state);
        }

        if let Some(effects) = last_effects {
            for check in self.effect_checks {
                check(&effects);
            }
        }
    }
}

/// Assertions over effect lists.
///
/// Effects are inert values until the store runs them, so these inspect
/// the list shape only; none of them execute anything.
pub mod assertions {
    use stellar_burgers_core::effect::{Effect, EventBusOperation};

    fn publish_topics<A>(effects: &[Effect<A>]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Publish(EventBusOperation::Publish { topic, .. }) => {
                    Some(topic.as_str())
                },
                _ => None,
            })
            .collect()
    }

    /// Assert the action produced no work: every effect is `Effect::None`.
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        let real: Vec<_> = effects
            .iter()
            .filter(|e| !matches!(e, Effect::None))
            .collect();
        assert!(
            real.is_empty(),
            "expected a no-op, but the reducer returned {real:?}"
        );
    }

    /// Assert at least one `Future` effect (an async call was scheduled).
    ///
    /// # Panics
    ///
    /// Panics if no `Future` effect is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected the reducer to schedule async work, but it returned no Future effect"
        );
    }

    /// Assert at least one `Delay` effect.
    ///
    /// # Panics
    ///
    /// Panics if no `Delay` effect is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Delay { .. })),
            "expected a delayed action, but the reducer returned no Delay effect"
        );
    }

    /// Assert that some effect publishes to `topic`.
    ///
    /// # Panics
    ///
    /// Panics if no `Publish` effect targets `topic`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_publishes_to_topic<A>(effects: &[Effect<A>], topic: &str) {
        let topics = publish_topics(effects);
        assert!(
            topics.contains(&topic),
            "expected a publish on '{topic}', but the reducer publishes to {topics:?}"
        );
    }

    /// Assert that some effect publishes an event of `event_type` to `topic`.
    ///
    /// # Panics
    ///
    /// Panics if no matching `Publish` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_publishes_event<A>(effects: &[Effect<A>], topic: &str, event_type: &str) {
        let found = effects.iter().any(|e| matches!(
            e,
            Effect::Publish(EventBusOperation::Publish { topic: t, event, .. })
                if t == topic && event.event_type == event_type
        ));
        assert!(
            found,
            "expected '{event_type}' published on '{topic}', \
             but the reducer publishes to {:?}",
            publish_topics(effects)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEventBus;
    use chrono::Utc;
    use std::sync::Arc;
    use stellar_burgers_core::event_bus::BusEvent;
    use stellar_burgers_core::{SmallVec, smallvec};

    // Stripped-down burger tray: enough domain to exercise the harness.
    #[derive(Clone, Debug, Default)]
    struct TrayState {
        bun: Option<String>,
        fillings: Vec<String>,
    }

    #[derive(Clone, Debug)]
    enum TrayAction {
        PlaceBun(String),
        AddFilling(String),
        Clear,
        Announce,
    }

    struct TrayEnv {
        bus: Arc<InMemoryEventBus>,
    }

    fn tray_env() -> TrayEnv {
        TrayEnv {
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    struct TrayReducer;

    impl Reducer for TrayReducer {
        type State = TrayState;
        type Action = TrayAction;
        type Environment = TrayEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TrayAction::PlaceBun(name) => {
                    state.bun = Some(name);
                    smallvec![Effect::None]
                },
                TrayAction::AddFilling(name) => {
                    state.fillings.push(name);
                    smallvec![Effect::None]
                },
                TrayAction::Clear => {
                    *state = TrayState::default();
                    smallvec![Effect::None]
                },
                TrayAction::Announce => {
                    let event = BusEvent::new(
                        "tray-changed",
                        serde_json::json!({ "fillings": state.fillings.len() }),
                        Utc::now(),
                    );
                    smallvec![Effect::publish(env.bus.clone(), "tray-events", event)]
                },
            }
        }
    }

    #[test]
    fn placing_a_bun_replaces_the_previous_one() {
        ReducerTest::new(TrayReducer)
            .with_env(tray_env())
            .given_state(TrayState {
                bun: Some("Krator bun".to_string()),
                fillings: vec![],
            })
            .when_action(TrayAction::PlaceBun("Fluorescent bun".to_string()))
            .then_state(|state| {
                assert_eq!(state.bun.as_deref(), Some("Fluorescent bun"));
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn queued_actions_reduce_in_order_against_one_state() {
        ReducerTest::new(TrayReducer)
            .with_env(tray_env())
            .given_state(TrayState::default())
            .when_actions([
                TrayAction::PlaceBun("Krator bun".to_string()),
                TrayAction::AddFilling("Space cutlet".to_string()),
                TrayAction::AddFilling("Galactic sauce".to_string()),
            ])
            .when_action(TrayAction::Clear)
            .then_state(|state| {
                assert!(state.bun.is_none());
                assert!(state.fillings.is_empty());
            })
            .run();
    }

    #[test]
    fn publish_assertions_match_topic_and_event_type() {
        ReducerTest::new(TrayReducer)
            .with_env(tray_env())
            .given_state(TrayState::default())
            .when_action(TrayAction::AddFilling("Space cutlet".to_string()))
            .when_action(TrayAction::Announce)
            .then_effects(|effects| {
                assertions::assert_publishes_to_topic(effects, "tray-events");
                assertions::assert_publishes_event(effects, "tray-events", "tray-changed");
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "expected a publish on 'order-events'")]
    fn topic_assertion_names_the_actual_topics_on_failure() {
        ReducerTest::new(TrayReducer)
            .with_env(tray_env())
            .given_state(TrayState::default())
            .when_action(TrayAction::Announce)
            .then_effects(|effects| {
                assertions::assert_publishes_to_topic(effects, "order-events");
            })
            .run();
    }
}
