//! Per-item parameter resolution
//!
//! An input item is a JSON object whose keys are form field names
//! (`chatId`, `messageText`, `options.limit`, ...). `Parameters` reads
//! them with the types the form declares.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, OptionStringExt};

/// Smallest accepted `options.limit`
pub const LIMIT_MIN: u64 = 1;
/// Largest accepted `options.limit`
pub const LIMIT_MAX: u64 = 100;
/// Form default for `options.limit`
pub const DEFAULT_LIMIT: u64 = 50;

/// Parameter values of one input item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: JsonObject,
}

impl Parameters {
    /// Wrap an object of parameter values
    pub fn new(values: JsonObject) -> Self {
        Self { values }
    }

    /// Read parameters from an input item. `null` counts as an empty item.
    pub fn from_item(item: &JsonValue) -> Result<Self> {
        match item {
            JsonValue::Object(map) => Ok(Self::new(map.clone())),
            JsonValue::Null => Ok(Self::default()),
            other => Err(Error::invalid_parameter(
                "item",
                format!("expected a JSON object, got {}", type_name(other)),
            )),
        }
    }

    /// Look up a value by name; dotted names reach into collections
    /// (`options.limit`).
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        let mut parts = name.split('.');
        let first = parts.next()?;
        let mut value = self.values.get(first)?;
        for part in parts {
            value = value.as_object()?.get(part)?;
        }
        match value {
            JsonValue::Null => None,
            v => Some(v),
        }
    }

    /// A required string. Numbers are accepted and rendered as text;
    /// empty strings count as missing.
    pub fn required_string(&self, name: &str) -> Result<String> {
        let value = self
            .get(name)
            .ok_or_else(|| Error::missing_parameter(name))?;

        let text = match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            other => {
                return Err(Error::invalid_parameter(
                    name,
                    format!("expected a string, got {}", type_name(other)),
                ))
            }
        };

        text.none_if_empty()
            .ok_or_else(|| Error::missing_parameter(name))
    }

    /// A boolean with a default for when the item leaves it out
    pub fn boolean(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(JsonValue::Bool(b)) => Ok(*b),
            Some(other) => Err(Error::invalid_parameter(
                name,
                format!("expected a boolean, got {}", type_name(other)),
            )),
        }
    }

    /// `options.limit`, validated against the form's 1–100 range.
    /// `None` when the item does not set it.
    pub fn limit(&self) -> Result<Option<usize>> {
        const NAME: &str = "options.limit";

        let Some(value) = self.get(NAME) else {
            return Ok(None);
        };

        let limit = match value {
            JsonValue::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                        .map(|f| f as u64)
                })
                .ok_or_else(|| {
                    Error::invalid_parameter(NAME, format!("expected a whole number, got {n}"))
                })?,
            other => {
                return Err(Error::invalid_parameter(
                    NAME,
                    format!("expected a number, got {}", type_name(other)),
                ))
            }
        };

        if !(LIMIT_MIN..=LIMIT_MAX).contains(&limit) {
            return Err(Error::invalid_parameter(
                NAME,
                format!("must be between {LIMIT_MIN} and {LIMIT_MAX}, got {limit}"),
            ));
        }

        Ok(Some(limit as usize))
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn params(value: JsonValue) -> Parameters {
        Parameters::from_item(&value).unwrap()
    }

    #[test]
    fn test_from_item_rejects_non_objects() {
        assert!(Parameters::from_item(&json!(null)).is_ok());
        let err = Parameters::from_item(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'item': expected a JSON object, got array"
        );
    }

    #[test]
    fn test_required_string() {
        let p = params(json!({"chatId": "!room:beeper.com", "accountId": 42}));
        assert_eq!(p.required_string("chatId").unwrap(), "!room:beeper.com");
        assert_eq!(p.required_string("accountId").unwrap(), "42");
    }

    #[test_case(json!({}) ; "absent")]
    #[test_case(json!({"chatId": null}) ; "null")]
    #[test_case(json!({"chatId": ""}) ; "empty")]
    fn test_required_string_missing(item: JsonValue) {
        let err = params(item).required_string("chatId").unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "chatId"));
    }

    #[test]
    fn test_required_string_wrong_type() {
        let err = params(json!({"chatId": true}))
            .required_string("chatId")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_boolean_default_and_value() {
        assert!(params(json!({})).boolean("archive", true).unwrap());
        assert!(!params(json!({"archive": false})).boolean("archive", true).unwrap());
        assert!(params(json!({"archive": "yes"})).boolean("archive", true).is_err());
    }

    #[test_case(json!({}), None ; "not set")]
    #[test_case(json!({"options": {}}), None ; "empty options")]
    #[test_case(json!({"options": {"limit": 1}}), Some(1) ; "lower bound")]
    #[test_case(json!({"options": {"limit": 50}}), Some(50) ; "default value")]
    #[test_case(json!({"options": {"limit": 100}}), Some(100) ; "upper bound")]
    #[test_case(json!({"options": {"limit": 10.0}}), Some(10) ; "whole float")]
    fn test_limit(item: JsonValue, expected: Option<usize>) {
        assert_eq!(params(item).limit().unwrap(), expected);
    }

    #[test_case(json!({"options": {"limit": 0}}) ; "zero")]
    #[test_case(json!({"options": {"limit": 101}}) ; "too large")]
    #[test_case(json!({"options": {"limit": -5}}) ; "negative")]
    #[test_case(json!({"options": {"limit": 2.5}}) ; "fractional")]
    #[test_case(json!({"options": {"limit": "10"}}) ; "string")]
    fn test_limit_invalid(item: JsonValue) {
        let err = params(item).limit().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "options.limit"));
    }
}
