//! Authenticated HTTP client
//!
//! Sends a `RequestDescriptor` to the Beeper Desktop API with the bearer
//! token attached, and decodes the JSON reply.

use super::request::RequestDescriptor;
use super::transport::Transport;
use crate::auth::{Authenticator, Credentials};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("beeper-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client bound to one set of credentials
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(credentials),
        })
    }

    /// Base URL every request path is appended to
    pub fn base_url(&self) -> &str {
        &self.authenticator.credentials().base_url
    }

    /// Send a request and decode the JSON response
    pub async fn request_json(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        let url = request.url(self.base_url())?;
        debug!("{} {}", request.method, url);

        let mut req = self.client.request(request.method.into(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(body) = request.payload() {
            req = req.json(body);
        }

        req = self.authenticator.apply(req);

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{} {} failed with {}", request.method, url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), text));
        }

        debug!("Request succeeded: {} {}", request.method, url);
        Ok(decode_body(&text))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        self.request_json(request).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("credentials", self.authenticator.credentials())
            .finish_non_exhaustive()
    }
}

/// Decode a response body. An empty body becomes an empty object and
/// text that is not JSON is returned as a string.
pub(crate) fn decode_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Object(JsonObject::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}
