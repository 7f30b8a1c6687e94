//! Reducer composition utilities.
//!
//! Large features are built from several focused reducers that all share the
//! same state, action, and environment types. [`combine_reducers`] runs them
//! in sequence for every action; [`scope_reducer`] lifts a reducer written
//! against a slice of state into a reducer over the whole state tree.

use crate::effect::Effect;
use crate::reducer::Reducer;

/// Combines multiple reducers over the same types into one.
///
/// Every reducer sees every action, in registration order; effects are
/// concatenated in the same order. Reducers that don't care about an action
/// return `Effect::None` and cost nothing.
///
/// # Examples
///
/// ```
/// use stellar_burgers_core::{Effect, Reducer, SmallVec, smallvec};
/// use stellar_burgers_core::composition::combine_reducers;
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: i32,
///     log: Vec<&'static str>,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) -> SmallVec<[Effect<Self::Action>; 4]> {
///         match action {
///             AppAction::Increment => state.counter += 1,
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// struct AuditReducer;
///
/// impl Reducer for AuditReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) -> SmallVec<[Effect<Self::Action>; 4]> {
///         match action {
///             AppAction::Increment => state.log.push("increment"),
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(AuditReducer)]);
///
/// let mut state = AppState::default();
/// let _effects = combined.reduce(&mut state, AppAction::Increment, &());
/// assert_eq!(state.counter, 1);
/// assert_eq!(state.log, vec!["increment"]);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = smallvec::SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This allows reducers written for a single slice (say, the burger
/// constructor) to be reused inside a larger application state.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (subset of `S`)
/// - `A`: The action type
/// - `E`: The environment type
///
/// # Examples
///
/// ```
/// use stellar_burgers_core::{Effect, Reducer, SmallVec, smallvec};
/// use stellar_burgers_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CartState {
///     items: Vec<String>,
/// }
///
/// #[derive(Clone)]
/// enum CartAction {
///     Add(String),
/// }
///
/// struct CartReducer;
///
/// impl Reducer for CartReducer {
///     type State = CartState;
///     type Action = CartAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) -> SmallVec<[Effect<Self::Action>; 4]> {
///         match action {
///             CartAction::Add(id) => state.items.push(id),
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     cart: CartState,
///     modal_open: bool,
/// }
///
/// let scoped = scope_reducer(
///     CartReducer,
///     |app_state: &AppState| &app_state.cart,
///     |app_state: &mut AppState, cart: CartState| {
///         app_state.cart = cart;
///     },
/// );
///
/// let mut state = AppState::default();
/// let _effects = scoped.reduce(&mut state, CartAction::Add("bun".into()), &());
/// assert_eq!(state.cart.items.len(), 1);
/// ```
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        // Extract the sub-state
        let sub_state = (self.get_state)(state).clone();

        // Create a mutable copy
        let mut mutable_sub_state = sub_state;

        // Run the reducer on the sub-state
        let effects = self.reducer.reduce(&mut mutable_sub_state, action, env);

        // Write the updated sub-state back
        (self.set_state)(state, mutable_sub_state);

        effects
    }
}
