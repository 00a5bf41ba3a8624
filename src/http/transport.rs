//! Authenticated JSON transport
//!
//! The dispatcher never talks to an HTTP library directly. It hands a
//! `RequestDescriptor` to a `Transport`, which owns the base URL, the
//! credentials and the wire.

use super::request::RequestDescriptor;
use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::sync::Arc;

/// Performs one authenticated JSON call
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the decoded response body.
    ///
    /// Non-success statuses are returned as errors carrying the status and
    /// the response text.
    async fn send(&self, request: &RequestDescriptor) -> Result<JsonValue>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        (**self).send(request).await
    }
}
