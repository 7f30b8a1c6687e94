//! In-memory provider implementations for tests.
//!
//! Available behind the `test-utils` feature and inside this crate's own
//! tests. Auth flows, order submission, and the feed run at memory speed.

pub mod api;
pub mod token_store;

pub use api::MockBurgerApi;
pub use token_store::MockTokenStore;
