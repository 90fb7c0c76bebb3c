//! Public configuration for the console API client.

use std::time::Duration;

/// Configuration for the console API client.
///
/// # Example
///
/// ```
/// use plane_http::ConsoleApiConfig;
/// use std::time::Duration;
///
/// let config = ConsoleApiConfig::new()
///     .with_base_url("http://10.0.0.5:8080/api")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleApiConfig {
    /// Base URL of the console API
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional bearer token
    pub(crate) token: Option<String>,
}

impl Default for ConsoleApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            user_agent: concat!("plane-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            token: None,
        }
    }
}

impl ConsoleApiConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the console API.
    ///
    /// Defaults to `http://127.0.0.1:8080/api`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
