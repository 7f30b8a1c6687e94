//! Provider traits for injected dependencies.
//!
//! Reducers never perform I/O directly; they describe effects that call
//! these traits through the environment. Production implementations live in
//! the client crate; in-memory implementations live in [`crate::mocks`].

pub mod api;
pub mod token_store;

pub use api::{
    ApiError, AuthPayload, BurgerApi, FeedSnapshot, OrderConfirmation, TokenPair,
};
pub use token_store::{TokenStore, TokenStoreError};
