//! Application configuration.
//!
//! Configuration values should be provided by the host application, not
//! hardcoded in reducers or effects.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://norma.nomoreparties.space/api";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the burger API.
    pub base_url: String,

    /// How long the shell waits for an order submission to settle.
    ///
    /// Default: 15 seconds
    pub submit_timeout: Duration,

    /// How long the shell waits for auth operations to settle.
    ///
    /// Default: 10 seconds
    pub auth_timeout: Duration,

    /// Action broadcast capacity of the store.
    ///
    /// Default: 64
    pub broadcast_capacity: usize,
}

impl AppConfig {
    /// Create a configuration with a custom base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the order submission timeout.
    #[must_use]
    pub const fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Set the auth operation timeout.
    #[must_use]
    pub const fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// Read overrides from the environment.
    ///
    /// Recognized variables: `BURGER_API_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BURGER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            submit_timeout: Duration::from_secs(15),
            auth_timeout: Duration::from_secs(10),
            broadcast_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = AppConfig::new("http://localhost:4000/api")
            .with_submit_timeout(Duration::from_secs(5))
            .with_auth_timeout(Duration::from_secs(2));

        assert_eq!(config.base_url, "http://localhost:4000/api");
        assert_eq!(config.submit_timeout, Duration::from_secs(5));
        assert_eq!(config.auth_timeout, Duration::from_secs(2));
        assert_eq!(config.broadcast_capacity, 64);
    }

    #[test]
    fn default_points_at_the_public_api() {
        assert_eq!(AppConfig::default().base_url, DEFAULT_BASE_URL);
    }
}
