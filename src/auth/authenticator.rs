//! Authenticator implementation
//!
//! Applies the bearer token to requests and runs the credential self-test.

use super::types::Credentials;
use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, Transport};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use tracing::{debug, warn};

/// Path requested to verify that a credential is usable
pub const CREDENTIAL_TEST_PATH: &str = "/v1/accounts";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
}

impl Authenticator {
    /// Create a new authenticator for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Credentials this authenticator was built from
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Value of the `Authorization` header.
    ///
    /// An empty token still yields `Bearer ` so servers that run without
    /// authentication accept the call unchanged.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.credentials.api_token)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, self.header_value())
    }

    /// Request issued by the credential self-test
    pub fn test_request() -> RequestDescriptor {
        RequestDescriptor::get(CREDENTIAL_TEST_PATH)
    }
}

/// Verify a credential by listing accounts.
///
/// Any successful response counts as proof the credential works. A failing
/// call is surfaced as `Error::CredentialTest` carrying the transport's
/// message.
pub async fn test_credentials<T: Transport + ?Sized>(transport: &T) -> Result<()> {
    debug!("Testing credentials with GET {}", CREDENTIAL_TEST_PATH);
    match transport.send(&Authenticator::test_request()).await {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!("Credential test failed: {e}");
            Err(Error::credential_test(e.to_string()))
        }
    }
}
