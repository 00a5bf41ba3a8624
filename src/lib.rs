// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Beeper Desktop API connector
//!
//! Talks to a locally running Beeper Desktop instance over its REST API:
//! list accounts, list/get/create/archive chats, search contacts, and
//! list/search/send messages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use beeper_connector::{Credentials, Dispatcher, HttpClient, OperationSelector, Result};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = HttpClient::new(Credentials::new("http://localhost:23373", "token"))?;
//!     beeper_connector::test_credentials(&client).await?;
//!
//!     let selector = OperationSelector::parse("message", "send")?;
//!     let items = [json!({ "chatId": "!room:beeper.local", "messageText": "hi" })];
//!     let records = Dispatcher::new(client).execute(selector, &items).await?;
//!     println!("{}", serde_json::to_string_pretty(&records)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              CLI (check / run / serve)                   │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  Dispatcher: items → parameters → request → records      │
//! └──────────────────────────────────────────────────────────┘
//!          │                    │                   │
//! ┌────────────────┬────────────────────┬─────────────────────┐
//! │ Operation table│ Transport (HTTP)   │ Auth (Bearer token) │
//! └────────────────┴────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer-token credentials and the credential test
pub mod auth;

/// HTTP client and request descriptors
pub mod http;

/// Resource/operation table
pub mod operation;

/// Per-item parameter access
pub mod parameters;

/// Form description of the node
pub mod description;

/// Per-item execution engine
pub mod engine;

/// Connector configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::{test_credentials, Authenticator, Credentials};
pub use config::ConnectorConfig;
pub use engine::{Dispatcher, ExecutionConfig, OutputRecord};
pub use http::{HttpClient, HttpClientConfig, RequestDescriptor, Transport};
pub use operation::{Operation, OperationSelector, Resource};
pub use parameters::Parameters;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
