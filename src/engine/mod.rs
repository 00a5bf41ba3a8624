//! Execution engine module
//!
//! Runs one (resource, operation) over a batch of input items.
//!
//! # Overview
//!
//! - `Dispatcher` - Resolves parameters, sends one request per item and
//!   reshapes the reply into output records
//! - `ExecutionConfig` - Whether a failing item aborts the batch
//! - `OutputRecord` - A JSON record tied to its input item index
//!
//! Items are processed strictly one after another so each failure is
//! attributed to its own index.

mod types;

pub use types::{ExecutionConfig, ExecutionStats, OutputRecord, PairedItem};

use crate::error::{Error, Result};
use crate::http::Transport;
use crate::operation::{lookup, Endpoint, OperationSelector};
use crate::parameters::Parameters;
use crate::types::JsonValue;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Dispatcher for a single batch
pub struct Dispatcher<T> {
    /// Authenticated transport
    transport: T,
    /// Execution configuration
    config: ExecutionConfig,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a new dispatcher
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: ExecutionConfig::default(),
        }
    }

    /// Set execution configuration
    #[must_use]
    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the selected operation over every item.
    ///
    /// An unsupported selector fails before any item is touched. With
    /// `continue_on_fail` a failing item yields `{ "error": message }`;
    /// otherwise the first failure aborts with `Error::ItemFailed`.
    pub async fn execute(
        &self,
        selector: OperationSelector,
        items: &[JsonValue],
    ) -> Result<Vec<OutputRecord>> {
        let endpoint = lookup(selector)?;
        let start = Instant::now();
        let mut stats = ExecutionStats::default();
        let mut records = Vec::new();

        for (index, item) in items.iter().enumerate() {
            stats.items += 1;
            match self.execute_item(endpoint, item).await {
                Ok(values) => {
                    records.extend(values.into_iter().map(|v| OutputRecord::new(v, index)));
                }
                Err(e) if self.config.continue_on_fail => {
                    warn!("{selector}: item {index} failed: {e}");
                    stats.failed += 1;
                    records.push(OutputRecord::error(index, e.to_string()));
                }
                Err(e) => return Err(Error::item_failed(index, e)),
            }
        }

        stats.records = records.len();
        info!(
            "{}: {} items, {} failed, {} records in {:?}",
            selector,
            stats.items,
            stats.failed,
            stats.records,
            start.elapsed()
        );

        Ok(records)
    }

    /// Run one item and return the values to emit for it
    async fn execute_item(&self, endpoint: &Endpoint, item: &JsonValue) -> Result<Vec<JsonValue>> {
        let params = Parameters::from_item(item)?;
        let request = endpoint.build_request(&params)?;
        let limit = if endpoint.truncates_items {
            params.limit()?
        } else {
            None
        };

        let response = self.transport.send(&request).await?;
        Ok(reshape(response, endpoint.truncates_items, limit))
    }
}

/// Turn a response body into the values to emit.
///
/// For list endpoints an `items` array is split into one value per element,
/// keeping the first `limit` in order. Anything else is emitted whole; a
/// top-level array yields one value per element.
pub fn reshape(response: JsonValue, truncates_items: bool, limit: Option<usize>) -> Vec<JsonValue> {
    let response = if truncates_items {
        match take_items(response) {
            Ok(mut items) => {
                if let Some(limit) = limit {
                    if items.len() > limit {
                        debug!("Truncating {} items to {}", items.len(), limit);
                        items.truncate(limit);
                    }
                }
                return items;
            }
            Err(response) => response,
        }
    } else {
        response
    };

    match response {
        JsonValue::Array(values) => values,
        other => vec![other],
    }
}

/// Pull the `items` array out of a list envelope, or hand the body back
fn take_items(response: JsonValue) -> std::result::Result<Vec<JsonValue>, JsonValue> {
    match response {
        JsonValue::Object(mut body) if matches!(body.get("items"), Some(JsonValue::Array(_))) => {
            match body.remove("items") {
                Some(JsonValue::Array(items)) => Ok(items),
                _ => Err(JsonValue::Object(body)),
            }
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests;
