//! # Stellar Burgers Application
//!
//! The burger constructor domain: state tree, reducers, provider traits,
//! and the [`AppShell`] composition root.
//!
//! ## Architecture
//!
//! Every feature is a state slice plus a reducer:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! The shell owns a store over [`AppState`] and drives request/response
//! flows (login, order submission) through the store's action broadcast.
//!
//! ## Example: submitting an order
//!
//! ```rust,ignore
//! use stellar_burgers_app::*;
//!
//! let shell = AppShell::new(AppConfig::default(), environment);
//! shell.bootstrap().await?;
//!
//! shell.login("user@example.com", "hunter2").await?;
//! shell.send(AppAction::AddIngredient(bun)).await?;
//! shell.send(AppAction::AddIngredient(cutlet)).await?;
//!
//! let order = shell.submit_order().await?;
//! println!("order #{} accepted", order.number);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod events;
pub mod guard;
pub mod providers;
pub mod reducers;
pub mod selectors;
pub mod shell;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{AppAction, UserUpdate};
pub use config::AppConfig;
pub use environment::{AppEnvironment, UuidGenerator};
pub use error::{AppError, Result};
pub use events::AppEvent;
pub use guard::{RouteAccess, RouteRule};
pub use reducers::AppReducer;
pub use shell::AppShell;
pub use state::{AppState, Ingredient, IngredientId, IngredientKind, InstanceId, Order, User};
