//! Error types for the Beeper connector
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Parameter Errors
    // ============================================================================
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    // ============================================================================
    // Dispatch Errors
    // ============================================================================
    #[error("Unknown resource: {resource}")]
    UnknownResource { resource: String },

    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String },

    #[error("Operation '{operation}' is not supported for resource '{resource}'")]
    UnsupportedOperation { resource: String, operation: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Credential test failed: {message}")]
    CredentialTest { message: String },

    // ============================================================================
    // Batch Errors
    // ============================================================================
    #[error("Item {index} failed: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a credential test error
    pub fn credential_test(message: impl Into<String>) -> Self {
        Self::CredentialTest {
            message: message.into(),
        }
    }

    /// Wrap an error with the index of the item that produced it
    pub fn item_failed(index: usize, source: Error) -> Self {
        Self::ItemFailed {
            index,
            source: Box::new(source),
        }
    }

    /// Index of the failing item, if this error came out of a batch
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Error::ItemFailed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Check if this error was raised before any request was sent
    pub fn is_input_error(&self) -> bool {
        match self {
            Error::MissingParameter { .. }
            | Error::InvalidParameter { .. }
            | Error::UnknownResource { .. }
            | Error::UnknownOperation { .. }
            | Error::UnsupportedOperation { .. } => true,
            Error::ItemFailed { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
