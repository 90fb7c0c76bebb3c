//! Console API client.

use plane_core::{CommandRequest, TailRequest};
use tracing::debug;
use url::Url;

use crate::config::ConsoleApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default console client using the reqwest HTTP backend.
pub type DefaultConsoleClient = ConsoleApiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the remote console API.
///
/// Generic over an HTTP backend so it can be tested without a network.
/// Use [`DefaultConsoleClient`] in production code.
pub struct ConsoleApiClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

impl DefaultConsoleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ConsoleApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Self::with_backend(base_url, backend)
    }
}

impl<B: HttpBackend> ConsoleApiClient<B> {
    /// Create a client over a custom backend.
    pub fn with_backend(base_url: Url, backend: B) -> ApiResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::UnusableBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self { backend, base_url })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) const fn backend(&self) -> &B {
        &self.backend
    }

    /// `{base}/console/{id}/{action}`
    fn console_url(&self, id: i64, action: &str) -> ApiResult<Url> {
        let id = id.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::UnusableBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["console", id.as_str(), action]);
        Ok(url)
    }

    pub(crate) fn tail_url(&self, request: &TailRequest) -> ApiResult<Url> {
        let mut url = self.console_url(request.id, "tail")?;
        url.query_pairs_mut()
            .append_pair("count", &request.count.to_string())
            .append_pair("tail", &request.tail.to_string())
            .append_pair("world_index", &request.world_index.to_string());
        Ok(url)
    }

    /// Fetch the most recent lines for a stream.
    pub async fn fetch_tail(&self, request: &TailRequest) -> ApiResult<Vec<String>> {
        let url = self.tail_url(request)?;
        let lines: Vec<String> = self.backend.get_json(&url).await?;
        debug!(
            id = request.id,
            world_index = request.world_index,
            lines = lines.len(),
            "Fetched history"
        );
        Ok(lines)
    }

    /// Send a command to process `id`.
    pub async fn send_command(&self, id: i64, request: &CommandRequest) -> ApiResult<()> {
        let url = self.console_url(id, "command")?;
        self.backend.post_json(&url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use plane_core::StreamKey;

    fn client(base: &str) -> ConsoleApiClient<FakeBackend> {
        ConsoleApiClient::with_backend(Url::parse(base).unwrap(), FakeBackend::new()).unwrap()
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultConsoleClient::new(&ConsoleApiConfig::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ConsoleApiConfig::new().with_base_url("not a url");
        assert!(matches!(
            DefaultConsoleClient::new(&config),
            Err(ApiError::InvalidUrl(_))
        ));

        let opaque = ConsoleApiClient::with_backend(
            Url::parse("mailto:ops@example.com").unwrap(),
            FakeBackend::new(),
        );
        assert!(matches!(opaque, Err(ApiError::UnusableBaseUrl { .. })));
    }

    #[test]
    fn test_tail_url_layout() {
        let request = TailRequest::for_key(StreamKey::new(5, 1));

        let url = client("http://host:8080/api").tail_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://host:8080/api/console/5/tail?count=1000&tail=1000&world_index=1"
        );

        // Trailing slash on the base does not double up
        let url = client("http://host:8080/api/").tail_url(&request).unwrap();
        assert!(url.as_str().starts_with("http://host:8080/api/console/5/tail?"));
    }

    #[test]
    fn test_negative_id_is_passed_through() {
        let url = client("http://host/api")
            .console_url(-3, "command")
            .unwrap();
        assert_eq!(url.as_str(), "http://host/api/console/-3/command");
    }
}
