//! Error types for application operations.

use crate::selectors::SubmitRefusal;
use stellar_burgers_runtime::StoreError;
use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the application shell.
///
/// Nothing here is fatal; every error leaves the application in a
/// re-enterable state.
#[derive(Debug, Error)]
pub enum AppError {
    /// An order submission was refused before any network call
    #[error("Order submission refused: {0}")]
    SubmitRefused(SubmitRefusal),

    /// The API rejected an operation
    #[error("{message}")]
    Rejected {
        /// Error message from the API or transport
        message: String,
    },

    /// The store runtime failed (shutdown, timeout, closed channel)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl std::fmt::Display for SubmitRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBun => write!(f, "no bun selected"),
            Self::NoIngredients => write!(f, "no ingredients selected"),
            Self::NotAuthenticated => write!(f, "not logged in"),
            Self::AlreadyInFlight => write!(f, "a submission is already in flight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_messages_are_stable() {
        let err = AppError::SubmitRefused(SubmitRefusal::MissingBun);
        assert_eq!(err.to_string(), "Order submission refused: no bun selected");
    }
}
