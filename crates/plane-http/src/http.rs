//! HTTP backend abstraction for the console API.
//!
//! A trait-based backend so the client can be exercised against canned
//! responses in tests. The production implementation uses reqwest.

use crate::config::ConsoleApiConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the console API.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T>;

    /// POST a JSON body, ignoring the response body.
    async fn post_json<B: Serialize + Sync>(&self, url: &Url, body: &B) -> ApiResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ConsoleApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            auth_token: config.token.clone(),
        })
    }

    /// Attach authentication if configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fail on non-success statuses.
    fn check_status(response: &reqwest::Response, url: &Url) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T> {
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url.as_str())).send().await?;
        Self::check_status(&response, url)?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_json<B: Serialize + Sync>(&self, url: &Url, body: &B) -> ApiResult<()> {
        debug!(%url, "POST");
        let response = self
            .authorize(self.client.post(url.as_str()))
            .json(body)
            .send()
            .await?;
        Self::check_status(&response, url)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A fake HTTP backend that returns canned responses and records posts.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Mutex<HashMap<String, serde_json::Value>>,
        failing_status: Option<u16>,
        pub gets: Mutex<Vec<String>>,
        pub posts: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs containing `url_contains`.
        pub fn with_response(self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url_contains.to_string(), json);
            self
        }

        /// Make every request fail with `status`.
        pub fn failing_with(mut self, status: u16) -> Self {
            self.failing_status = Some(status);
            self
        }

        fn fail_if_configured(&self, url: &Url) -> ApiResult<()> {
            match self.failing_status {
                Some(status) => Err(ApiError::RequestFailed {
                    status,
                    url: url.to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T> {
            self.gets.lock().unwrap().push(url.to_string());
            self.fail_if_configured(url)?;

            let json = {
                let responses = self.responses.lock().unwrap();
                responses
                    .iter()
                    .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                    .map(|(_, json)| json.clone())
            }
            .ok_or_else(|| ApiError::RequestFailed {
                status: 404,
                url: url.to_string(),
            })?;

            Ok(serde_json::from_value(json)?)
        }

        async fn post_json<B: Serialize + Sync>(&self, url: &Url, body: &B) -> ApiResult<()> {
            self.fail_if_configured(url)?;
            let json = serde_json::to_value(body)?;
            self.posts.lock().unwrap().push((url.to_string(), json));
            Ok(())
        }
    }
}
