//! Slack Web API client over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use slack_core::{ApiParams, ApiResponse, SlackApi, TransportError};
use thiserror::Error;

/// Base URL of the public Web API
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while building the client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    #[error("Missing API token")]
    MissingToken,
}

/// Client configuration
#[derive(Clone)]
pub struct SlackClientConfig {
    pub token: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SlackClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClientConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SlackClientConfig {
    /// Configuration for the public API with the given token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client somewhere else (proxies, test servers)
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&slack_common::SlackConfig> for SlackClientConfig {
    fn from(config: &slack_common::SlackConfig) -> Self {
        Self {
            token: config.token.clone(),
            api_url: config.api_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Slack Web API client
#[derive(Clone)]
pub struct WebClient {
    client: Client,
    token: String,
    api_url: String,
}

impl std::fmt::Debug for WebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl WebClient {
    /// Create a new client
    pub fn new(config: SlackClientConfig) -> Result<Self, ClientError> {
        if config.token.trim().is_empty() {
            return Err(ClientError::MissingToken);
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            token: config.token,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new client from slack-common config
    pub fn from_config(config: &slack_common::SlackConfig) -> Result<Self, ClientError> {
        Self::new(SlackClientConfig::from(config))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_url)
    }
}

#[async_trait]
impl SlackApi for WebClient {
    async fn call(&self, method: &str, params: &ApiParams) -> Result<ApiResponse, TransportError> {
        let url = self.method_url(method);
        let form: Vec<(&str, &str)> = params.iter().collect();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .form(&form)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(method, status = status.as_u16(), "Slack returned HTTP error");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        ApiResponse::from_slice(&body)
    }
}
