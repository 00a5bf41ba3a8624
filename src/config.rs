//! Connector configuration
//!
//! A config file holds the credentials and execution defaults. It may be
//! written in YAML or JSON (JSON parses as YAML).
//!
//! ```yaml
//! credentials:
//!   baseUrl: http://localhost:23373
//!   apiToken: my-token
//! continue_on_fail: true
//! http:
//!   timeout_secs: 10
//! ```

use crate::auth::Credentials;
use crate::engine::ExecutionConfig;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level connector configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Credentials for the Beeper Desktop API
    #[serde(default)]
    pub credentials: Credentials,

    /// Record failing items instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Override the user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ConnectorConfig {
    /// Parse configuration from a YAML or JSON string
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// HTTP client configuration derived from these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_secs));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Execution configuration derived from these settings
    pub fn execution_config(&self) -> ExecutionConfig {
        ExecutionConfig {
            continue_on_fail: self.continue_on_fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConnectorConfig::parse("").unwrap();
        assert_eq!(config.credentials, Credentials::default());
        assert!(!config.continue_on_fail);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r"
credentials:
  baseUrl: http://beeper.local:1234
  apiToken: secret
continue_on_fail: true
http:
  timeout_secs: 5
  user_agent: my-agent/2.0
";
        let config = ConnectorConfig::parse(yaml).unwrap();
        assert_eq!(config.credentials.base_url, "http://beeper.local:1234");
        assert_eq!(config.credentials.api_token, "secret");
        assert!(config.execution_config().continue_on_fail);

        let http = config.http_client_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.user_agent, "my-agent/2.0");
    }

    #[test]
    fn test_parse_json() {
        let config =
            ConnectorConfig::parse(r#"{"credentials": {"apiToken": "t"}}"#).unwrap();
        assert_eq!(config.credentials.base_url, "http://localhost:23373");
        assert_eq!(config.credentials.api_token, "t");
    }

    #[test]
    fn test_invalid_config() {
        let err = ConnectorConfig::parse("continue_on_fail: [1, 2").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "credentials:\n  apiToken: from-file").unwrap();

        let config = ConnectorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.credentials.api_token, "from-file");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConnectorConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
