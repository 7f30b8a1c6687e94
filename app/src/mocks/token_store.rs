//! Mock token store for testing.

#![allow(clippy::unwrap_used)] // Mock internals lock an in-process mutex

use crate::providers::{TokenPair, TokenStore, TokenStoreError};
use std::sync::{Arc, Mutex};

/// Mock token store.
///
/// Keeps the pair in memory behind a mutex so tests can assert on it.
#[derive(Debug, Clone, Default)]
pub struct MockTokenStore {
    tokens: Arc<Mutex<Option<TokenPair>>>,
}

impl MockTokenStore {
    /// Create an empty token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token pair.
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(Some(tokens))),
        }
    }

    /// The currently stored pair (for assertions).
    #[must_use]
    pub fn current(&self) -> Option<TokenPair> {
        self.tokens.lock().unwrap().clone()
    }
}

impl TokenStore for MockTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .as_ref()
            .map(|pair| pair.access_token.clone()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .as_ref()
            .map(|pair| pair.refresh_token.clone()))
    }

    async fn set_tokens(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        *self.tokens.lock().unwrap() = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.tokens.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokens_are_written_and_cleared_together() {
        let store = MockTokenStore::new();
        assert_eq!(store.access_token().await.unwrap(), None);

        let pair = TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        };
        store.set_tokens(&pair).await.unwrap();
        assert_eq!(
            store.access_token().await.unwrap(),
            Some("access-1".to_string())
        );
        assert_eq!(
            store.refresh_token().await.unwrap(),
            Some("refresh-1".to_string())
        );

        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
