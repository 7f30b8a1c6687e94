//! Checkout and order submission reducer.
//!
//! Drives the step machine `Cart → Delivery → Contacts → Success`, validates
//! the delivery and contact forms locally, and submits accepted compositions
//! to the orders endpoint. Invalid input blocks advancement without any
//! network call; refused submissions never reach the network either.

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::events::{self, AppEvent};
use crate::providers::{BurgerApi, TokenStore};
use crate::selectors::{self, SubmitRefusal};
use crate::state::{
    AppState, CheckoutErrors, CheckoutStep, ConstructorState, Order, OrderState, OrderStatus,
};
use stellar_burgers_core::effect::Effect;
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_core::{SmallVec, smallvec};

/// Checkout reducer.
#[derive(Debug, Clone)]
pub struct CheckoutReducer<A, T> {
    _phantom: std::marker::PhantomData<(A, T)>,
}

impl<A, T> CheckoutReducer<A, T> {
    /// Create a new checkout reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, T> Default for CheckoutReducer<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for CheckoutReducer<A, T>
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
            // Step machine & forms
            // ═══════════════════════════════════════════════════════════════
            AppAction::OpenCheckout => {
                state.checkout.step = CheckoutStep::Cart;
                state.checkout.errors = CheckoutErrors::default();
                smallvec![Effect::None]
            },

            AppAction::SetDelivery(info) => {
                if info.address.trim().is_empty() {
                    state.checkout.errors.address = Some("Address is required".to_string());
                    return smallvec![Effect::None];
                }

                state.checkout.errors.address = None;
                state.checkout.delivery = Some(info);
                smallvec![Effect::None]
            },

            AppAction::SetContacts(info) => {
                let email_ok = is_valid_email(&info.email);
                let phone_ok = is_valid_phone(&info.phone);

                state.checkout.errors.email =
                    (!email_ok).then(|| "Invalid email address".to_string());
                state.checkout.errors.phone =
                    (!phone_ok).then(|| "Invalid phone number".to_string());

                if email_ok && phone_ok {
                    state.checkout.contacts = Some(info);
                }
                smallvec![Effect::None]
            },

            AppAction::NextStep => {
                state.checkout.step = match state.checkout.step {
                    CheckoutStep::Cart => CheckoutStep::Delivery,
                    CheckoutStep::Delivery
                        if state.checkout.delivery.is_some()
                            && state.checkout.errors.address.is_none() =>
                    {
                        CheckoutStep::Contacts
                    },
                    // Success is reached only through an accepted order
                    step => step,
                };
                smallvec![Effect::None]
            },

            AppAction::PrevStep => {
                state.checkout.step = match state.checkout.step {
                    CheckoutStep::Contacts => CheckoutStep::Delivery,
                    CheckoutStep::Delivery => CheckoutStep::Cart,
                    step => step,
                };
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // SubmitOrder: preconditions, then POST the composition
            // ═══════════════════════════════════════════════════════════════
            AppAction::SubmitOrder { from } => {
                if let Some(refusal) = selectors::submit_refusal(state) {
                    tracing::warn!(%refusal, "order submission refused");
                    return match refusal {
                        SubmitRefusal::NotAuthenticated => smallvec![events::publish(
                            &env.event_bus,
                            AppEvent::LoginRequired { from },
                            env.clock.now(),
                        )],
                        _ => smallvec![Effect::None],
                    };
                }

                let Some(composition) = selectors::burger_composition(&state.constructor) else {
                    // submit_refusal above guarantees a bun is present
                    return smallvec![Effect::None];
                };

                state.order.order_request = true;
                state.order.error = None;

                let total = selectors::total_price(&state.constructor);
                let api = env.api.clone();
                let tokens = env.tokens.clone();
                let submitted_at = env.clock.now();

                smallvec![Effect::Future(Box::pin(async move {
                    let access = match tokens.access_token().await {
                        Ok(Some(token)) => token,
                        Ok(None) => {
                            return Some(AppAction::OrderFailed {
                                message: "Missing access token".to_string(),
                            });
                        },
                        Err(error) => {
                            return Some(AppAction::OrderFailed {
                                message: error.to_string(),
                            });
                        },
                    };

                    match api.submit_order(&access, &composition).await {
                        Ok(confirmation) => Some(AppAction::OrderAccepted {
                            order: Order {
                                number: confirmation.number,
                                name: confirmation.name,
                                status: OrderStatus::Created,
                                ingredients: composition,
                                created_at: submitted_at,
                                updated_at: submitted_at,
                                total,
                            },
                        }),
                        Err(error) => {
                            tracing::warn!(%error, "order submission failed");
                            Some(AppAction::OrderFailed {
                                message: error.to_string(),
                            })
                        },
                    }
                }))]
            },

            AppAction::OrderAccepted { order } => {
                let number = order.number;
                state.order.order_request = false;
                state.order.error = None;
                state.order.order = Some(order);
                state.checkout.step = CheckoutStep::Success;
                state.constructor = ConstructorState::default();

                let now = env.clock.now();
                smallvec![
                    events::publish(&env.event_bus, AppEvent::OrderAccepted { number }, now),
                    events::publish(&env.event_bus, AppEvent::ConstructorCleared, now),
                ]
            },

            AppAction::OrderFailed { message } => {
                // Constructor preserved so the user can retry; step unchanged.
                state.order.order_request = false;
                state.order.error = Some(message.clone());

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::OrderFailed { message },
                    env.clock.now(),
                )]
            },

            AppAction::ClearOrderDetails => {
                state.order = OrderState::default();
                state.checkout.step = CheckoutStep::Cart;
                smallvec![Effect::None]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}

/// Minimal email shape check: `local@domain.tld`.
fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
}

/// Minimal phone shape check: at least 10 digits, `+ - ( )` and spaces allowed.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let valid_chars = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    valid_chars && digits >= 10
}
