//! Authentication module
//!
//! The Beeper Desktop API authenticates every call with a bearer token in
//! the `Authorization` header. A credential is verified with a single
//! `GET /v1/accounts` request.

mod authenticator;
mod types;

pub use authenticator::{test_credentials, Authenticator, CREDENTIAL_TEST_PATH};
pub use types::{credential_type, CredentialType, Credentials, DEFAULT_BASE_URL};
