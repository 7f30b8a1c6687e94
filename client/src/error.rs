//! Error types for the HTTP client.

use stellar_burgers_app::providers::ApiError;
use thiserror::Error;

/// Errors produced while talking to the remote API.
///
/// Converted into the provider-level `ApiError` at the trait boundary, so
/// reducers never see `reqwest` types.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failure, DNS, timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the body, if any
        message: String,
    },

    /// The envelope reported `success: false`
    #[error("API error: {message}")]
    Api {
        /// Error message from the envelope
        message: String,
    },

    /// The access token was rejected
    #[error("not authorized")]
    Unauthorized,

    /// The body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Transport(e) => Self::Transport(e.to_string()),
            ClientError::Status { status, message } => Self::Status { status, message },
            ClientError::Api { message } => Self::Api { message },
            ClientError::Unauthorized => Self::Unauthorized,
            ClientError::Decode(message) => Self::Decode(message),
        }
    }
}
