//! Request descriptor built per input item

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, QueryMap};
use serde::Serialize;
use url::Url;

/// A single outbound API call, independent of any HTTP library
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, already percent-encoded
    pub path: String,
    /// Query-string parameters
    #[serde(skip_serializing_if = "QueryMap::is_empty")]
    pub query: QueryMap,
    /// JSON body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl RequestDescriptor {
    /// Create a request descriptor
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryMap::new(),
            body: None,
        }
    }

    /// Create a GET request descriptor
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request descriptor
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Body to send, if any. An empty object is not sent.
    pub fn payload(&self) -> Option<&JsonValue> {
        match &self.body {
            Some(JsonValue::Object(map)) if map.is_empty() => None,
            other => other.as_ref(),
        }
    }

    /// Resolve the full URL against a base URL
    pub fn url(&self, base_url: &str) -> Result<Url> {
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(Error::config(format!(
                "Request path must start with '/': {}",
                self.path
            )));
        }
        let full = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        Ok(Url::parse(&full)?)
    }
}
