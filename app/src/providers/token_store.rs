//! Token store provider trait.

use super::api::TokenPair;
use std::future::Future;
use thiserror::Error;

/// Errors returned by [`TokenStore`] implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenStoreError {
    /// The backing storage failed
    #[error("Token storage error: {0}")]
    Storage(String),
}

/// Persisted token storage.
///
/// Hosts back this with whatever storage they have available, such as a
/// cookie jar for the access token and disk for the refresh token. Both
/// tokens are written and cleared together.
pub trait TokenStore: Send + Sync {
    /// The current access token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn access_token(
        &self,
    ) -> impl Future<Output = Result<Option<String>, TokenStoreError>> + Send;

    /// The current refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn refresh_token(
        &self,
    ) -> impl Future<Output = Result<Option<String>, TokenStoreError>> + Send;

    /// Persist a fresh token pair, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn set_tokens(
        &self,
        tokens: &TokenPair,
    ) -> impl Future<Output = Result<(), TokenStoreError>> + Send;

    /// Clear both tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn clear(&self) -> impl Future<Output = Result<(), TokenStoreError>> + Send;
}
