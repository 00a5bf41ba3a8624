//! HTTP module
//!
//! Request descriptors, the `Transport` seam the dispatcher sends through,
//! and the reqwest-backed authenticated client that implements it.
//!
//! Calls are made once: there are no retries, no rate limiting and no
//! pagination beyond what the caller asks for.

mod client;
mod request;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use request::RequestDescriptor;
pub use transport::Transport;
