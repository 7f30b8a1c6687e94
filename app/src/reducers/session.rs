//! Session reducer.
//!
//! Owns the login lifecycle: the boot-time auth check (with a one-shot token
//! refresh for expired access tokens), credential login and registration,
//! logout, profile updates, and the password-reset pair.
//!
//! # Flow
//!
//! 1. `CheckAuth` at boot: token lookup, profile fetch, refresh on rejection
//! 2. `AuthChecked` marks the session decided either way; route guards stay
//!    `Pending` until then
//! 3. Logout always clears both tokens, the constructor, and order details,
//!    even when revocation fails

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::events::{self, AppEvent};
use crate::providers::{ApiError, BurgerApi, TokenStore};
use crate::state::{AppState, ConstructorState, OrderState, User};
use stellar_burgers_core::effect::Effect;
use stellar_burgers_core::reducer::Reducer;
use stellar_burgers_core::{SmallVec, smallvec};

/// Session reducer.
#[derive(Debug, Clone)]
pub struct SessionReducer<A, T> {
    _phantom: std::marker::PhantomData<(A, T)>,
}

impl<A, T> SessionReducer<A, T> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, T> Default for SessionReducer<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> Reducer for SessionReducer<A, T>
where
    A: BurgerApi + Clone + 'static,
    T: TokenStore + Clone + 'static,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<A, T>;

    #[allow(clippy::too_many_lines)] // One arm per session action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // CheckAuth: token lookup → profile fetch → mark auth-checked
            // ═══════════════════════════════════════════════════════════════
            AppAction::CheckAuth => {
                let api = env.api.clone();
                let tokens = env.tokens.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let access = match tokens.access_token().await {
                        Ok(Some(token)) => token,
                        // No token: auth-checked immediately, not logged in
                        Ok(None) => return Some(AppAction::AuthChecked { user: None }),
                        Err(error) => {
                            tracing::warn!(%error, "token store failed during auth check");
                            return Some(AppAction::AuthChecked { user: None });
                        },
                    };

                    match api.fetch_user(&access).await {
                        Ok(user) => Some(AppAction::AuthChecked { user: Some(user) }),
                        Err(ApiError::Unauthorized) => {
                            // One-shot refresh, then retry the profile fetch
                            let user = refresh_and_fetch(&api, &tokens).await;
                            if user.is_none() {
                                let _ = tokens.clear().await;
                            }
                            Some(AppAction::AuthChecked { user })
                        },
                        Err(error) => {
                            tracing::warn!(%error, "profile fetch failed during auth check");
                            Some(AppAction::AuthChecked { user: None })
                        },
                    }
                }))]
            },

            AppAction::AuthChecked { user } => {
                state.session.is_auth_checked = true;
                state.session.is_authenticated = user.is_some();
                state.session.user = user;

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::AuthChecked {
                        is_authenticated: state.session.is_authenticated,
                    },
                    env.clock.now(),
                )]
            },

            // ═══════════════════════════════════════════════════════════════
            // Login / Register
            // ═══════════════════════════════════════════════════════════════
            AppAction::Login { email, password } => {
                state.session.error = None;

                let api = env.api.clone();
                let tokens = env.tokens.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.login(&email, &password).await {
                        Ok(payload) => {
                            if let Err(error) = tokens.set_tokens(&payload.tokens).await {
                                return Some(AppAction::LoginFailed {
                                    message: error.to_string(),
                                });
                            }
                            Some(AppAction::LoginSucceeded { user: payload.user })
                        },
                        Err(error) => Some(AppAction::LoginFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::LoginSucceeded { user } | AppAction::RegisterSucceeded { user } => {
                let email = user.email.clone();
                state.session.is_auth_checked = true;
                state.session.is_authenticated = true;
                state.session.user = Some(user);
                state.session.error = None;

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::LoginSucceeded { email },
                    env.clock.now(),
                )]
            },

            AppAction::LoginFailed { message } | AppAction::RegisterFailed { message } => {
                state.session.error = Some(message.clone());

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::LoginFailed { message },
                    env.clock.now(),
                )]
            },

            AppAction::Register {
                email,
                name,
                password,
            } => {
                state.session.error = None;

                let api = env.api.clone();
                let tokens = env.tokens.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.register(&email, &name, &password).await {
                        Ok(payload) => {
                            if let Err(error) = tokens.set_tokens(&payload.tokens).await {
                                return Some(AppAction::RegisterFailed {
                                    message: error.to_string(),
                                });
                            }
                            Some(AppAction::RegisterSucceeded { user: payload.user })
                        },
                        Err(error) => Some(AppAction::RegisterFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            // ═══════════════════════════════════════════════════════════════
            // Logout: revoke best-effort, clear tokens unconditionally
            // ═══════════════════════════════════════════════════════════════
            AppAction::Logout => {
                let api = env.api.clone();
                let tokens = env.tokens.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match tokens.refresh_token().await {
                        Ok(Some(refresh)) => {
                            if let Err(error) = api.logout(&refresh).await {
                                tracing::warn!(%error, "refresh token revocation failed");
                            }
                        },
                        Ok(None) => {},
                        Err(error) => {
                            tracing::warn!(%error, "token store failed during logout");
                        },
                    }

                    if let Err(error) = tokens.clear().await {
                        tracing::warn!(%error, "failed to clear tokens");
                    }
                    Some(AppAction::LogoutCompleted)
                }))]
            },

            AppAction::LogoutCompleted => {
                // Auth-checked stays true: the session is decided, just empty.
                state.session.is_authenticated = false;
                state.session.user = None;
                state.session.error = None;
                state.constructor = ConstructorState::default();
                state.order = OrderState::default();

                let now = env.clock.now();
                smallvec![
                    events::publish(&env.event_bus, AppEvent::LoggedOut, now),
                    events::publish(&env.event_bus, AppEvent::ConstructorCleared, now),
                ]
            },

            // ═══════════════════════════════════════════════════════════════
            // Profile update
            // ═══════════════════════════════════════════════════════════════
            AppAction::UpdateUser(update) => {
                state.session.error = None;

                let api = env.api.clone();
                let tokens = env.tokens.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let access = match tokens.access_token().await {
                        Ok(Some(token)) => token,
                        Ok(None) => {
                            return Some(AppAction::UserUpdateFailed {
                                message: "Missing access token".to_string(),
                            });
                        },
                        Err(error) => {
                            return Some(AppAction::UserUpdateFailed {
                                message: error.to_string(),
                            });
                        },
                    };

                    match api.update_user(&access, &update).await {
                        Ok(user) => Some(AppAction::UserUpdated { user }),
                        Err(error) => Some(AppAction::UserUpdateFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::UserUpdated { user } => {
                state.session.user = Some(user);
                state.session.error = None;

                smallvec![events::publish(
                    &env.event_bus,
                    AppEvent::UserUpdated,
                    env.clock.now(),
                )]
            },

            AppAction::UserUpdateFailed { message } => {
                state.session.error = Some(message);
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Password reset
            // ═══════════════════════════════════════════════════════════════
            AppAction::ForgotPassword { email } => {
                state.session.error = None;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.forgot_password(&email).await {
                        Ok(()) => Some(AppAction::PasswordResetSucceeded),
                        Err(error) => Some(AppAction::PasswordResetFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::ResetPassword { password, token } => {
                state.session.error = None;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.reset_password(&password, &token).await {
                        Ok(()) => Some(AppAction::PasswordResetSucceeded),
                        Err(error) => Some(AppAction::PasswordResetFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            AppAction::PasswordResetSucceeded => {
                state.session.error = None;
                smallvec![Effect::None]
            },

            AppAction::PasswordResetFailed { message } => {
                state.session.error = Some(message);
                smallvec![Effect::None]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}

/// Refresh the token pair and retry the profile fetch once.
async fn refresh_and_fetch<A, T>(api: &A, tokens: &T) -> Option<User>
where
    A: BurgerApi,
    T: TokenStore,
{
    let refresh = match tokens.refresh_token().await {
        Ok(Some(token)) => token,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(%error, "token store failed during refresh");
            return None;
        },
    };

    let pair = match api.refresh_token(&refresh).await {
        Ok(pair) => pair,
        Err(error) => {
            tracing::info!(%error, "token refresh rejected");
            return None;
        },
    };

    if let Err(error) = tokens.set_tokens(&pair).await {
        tracing::warn!(%error, "failed to persist refreshed tokens");
        return None;
    }

    match api.fetch_user(&pair.access_token).await {
        Ok(user) => Some(user),
        Err(error) => {
            tracing::warn!(%error, "profile fetch failed after refresh");
            None
        },
    }
}
