//! Credential types
//!
//! `Credentials` is the runtime record supplied by the host configuration;
//! `CredentialType` is the static descriptor shown to users when they set
//! one up.

use crate::description::Property;
use crate::types::PropertyType;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Default address of a locally running Beeper Desktop API
pub const DEFAULT_BASE_URL: &str = "http://localhost:23373";

/// Credentials used for every outgoing request of a batch
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Base URL of the Beeper Desktop API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token sent as a bearer token (may be empty)
    #[serde(default)]
    pub api_token: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
        }
    }
}

impl Credentials {
    /// Create credentials for the given base URL and token
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.api_token.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_token", &token)
            .finish()
    }
}

/// Static credential descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialType {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub properties: Vec<Property>,
    /// Header template applied to each request
    pub authenticate: serde_json::Value,
    /// Request issued to verify a credential
    pub test: serde_json::Value,
}

/// Descriptor for the `beeperApi` credential
pub fn credential_type() -> CredentialType {
    CredentialType {
        name: "beeperApi",
        display_name: "Beeper API",
        documentation_url: "https://developers.beeper.com/desktop-api",
        properties: vec![
            Property::new("Base URL", "baseUrl", PropertyType::String)
                .default_value(json!(DEFAULT_BASE_URL))
                .placeholder(DEFAULT_BASE_URL)
                .description("The base URL of your Beeper Desktop API"),
            Property::new("API Token", "apiToken", PropertyType::String)
                .default_value(json!(""))
                .password()
                .description("The API token for authentication (if required)"),
        ],
        authenticate: json!({
            "type": "generic",
            "properties": {
                "headers": { "Authorization": "Bearer {apiToken}" }
            }
        }),
        test: json!({
            "request": {
                "baseURL": "{baseUrl}",
                "url": super::CREDENTIAL_TEST_PATH,
                "method": "GET"
            }
        }),
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_credentials_default() {
        let creds = Credentials::default();
        assert_eq!(creds.base_url, "http://localhost:23373");
        assert!(creds.api_token.is_empty());
    }

    #[test]
    fn test_credentials_serde_defaults() {
        let creds: Credentials = serde_json::from_str(r#"{"apiToken": "tok"}"#).unwrap();
        assert_eq!(creds.base_url, DEFAULT_BASE_URL);
        assert_eq!(creds.api_token, "tok");

        let creds: Credentials =
            serde_json::from_str(r#"{"baseUrl": "http://beeper.local:1234"}"#).unwrap();
        assert_eq!(creds.base_url, "http://beeper.local:1234");
        assert_eq!(creds.api_token, "");
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new("http://localhost:23373", "super-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_credential_type_properties() {
        let descriptor = credential_type();
        assert_eq!(descriptor.name, "beeperApi");

        let names: Vec<&str> = descriptor.properties.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["baseUrl", "apiToken"]);

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["properties"][1]["typeOptions"]["password"], true);
        assert_eq!(json["test"]["request"]["url"], "/v1/accounts");
    }
}
