//! Engine types

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Configuration for a batch execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfig {
    /// Record failing items as `{ "error": ... }` and keep going
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl ExecutionConfig {
    /// Config that keeps processing after a failed item
    pub fn continue_on_fail() -> Self {
        Self {
            continue_on_fail: true,
        }
    }
}

/// Link from an output record back to its input item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    /// Index of the originating input item
    pub item: usize,
}

/// One emitted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub json: JsonObject,
    pub paired_item: PairedItem,
}

impl OutputRecord {
    /// Record for the item at `item`. Values that are not objects are
    /// wrapped as `{ "value": ... }`.
    pub fn new(json: JsonValue, item: usize) -> Self {
        let json = match json {
            JsonValue::Object(map) => map,
            other => {
                let mut map = JsonObject::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self {
            json,
            paired_item: PairedItem { item },
        }
    }

    /// Error record for a failed item
    pub fn error(item: usize, message: impl Into<String>) -> Self {
        let mut json = JsonObject::new();
        json.insert("error".to_string(), JsonValue::String(message.into()));
        Self {
            json,
            paired_item: PairedItem { item },
        }
    }

    /// Index of the originating input item
    pub fn item(&self) -> usize {
        self.paired_item.item
    }

    /// Error message, if this is an error record
    pub fn error_message(&self) -> Option<&str> {
        if self.json.len() != 1 {
            return None;
        }
        self.json.get("error").and_then(JsonValue::as_str)
    }
}

/// Counters for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionStats {
    /// Items processed
    pub items: usize,
    /// Items that failed (recorded as error records)
    pub failed: usize,
    /// Records emitted, error records included
    pub records: usize,
}
