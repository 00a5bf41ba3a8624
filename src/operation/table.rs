//! The endpoint table
//!
//! Path templates name their parameters in braces (`{chatId}`). Values are
//! percent-encoded before they are spliced in, so an ID containing `/`
//! stays a single path segment.

use super::types::{Operation, OperationSelector, Resource};
use crate::error::{Error, Result};
use crate::http::RequestDescriptor;
use crate::parameters::Parameters;
use crate::types::{JsonObject, JsonValue, Method};
use tracing::debug;

/// How a body field is read from the item parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required, non-empty string
    Text,
    /// Boolean with a form default
    Flag { default: bool },
}

/// One key of the JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyField {
    /// Key in the JSON body
    pub key: &'static str,
    /// Parameter the value is read from
    pub parameter: &'static str,
    pub kind: FieldKind,
}

/// One query-string parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryField {
    pub key: &'static str,
    pub parameter: &'static str,
}

/// Request recipe for one (resource, operation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub resource: Resource,
    pub operation: Operation,
    pub method: Method,
    /// Path template relative to the base URL
    pub path: &'static str,
    pub query: &'static [QueryField],
    pub body: &'static [BodyField],
    /// Response carries an `items` list that is split into records and
    /// may be cut down to `options.limit`
    pub truncates_items: bool,
}

const fn text(key: &'static str, parameter: &'static str) -> BodyField {
    BodyField {
        key,
        parameter,
        kind: FieldKind::Text,
    }
}

const fn q(parameter: &'static str) -> QueryField {
    QueryField {
        key: "q",
        parameter,
    }
}

const fn endpoint(
    resource: Resource,
    operation: Operation,
    method: Method,
    path: &'static str,
) -> Endpoint {
    Endpoint {
        resource,
        operation,
        method,
        path,
        query: &[],
        body: &[],
        truncates_items: false,
    }
}

/// Every supported call of the Beeper Desktop API
pub static ENDPOINTS: &[Endpoint] = &[
    endpoint(Resource::Account, Operation::List, Method::GET, "/v1/accounts"),
    Endpoint {
        truncates_items: true,
        ..endpoint(Resource::Chat, Operation::List, Method::GET, "/v1/chats")
    },
    endpoint(Resource::Chat, Operation::Get, Method::GET, "/v1/chats/{chatId}"),
    Endpoint {
        body: &[text("account_id", "accountId"), text("recipient", "recipient")],
        ..endpoint(Resource::Chat, Operation::Create, Method::POST, "/v1/chats")
    },
    Endpoint {
        query: &[q("searchQuery")],
        ..endpoint(Resource::Chat, Operation::Search, Method::GET, "/v1/chats/search")
    },
    Endpoint {
        body: &[BodyField {
            key: "archive",
            parameter: "archive",
            kind: FieldKind::Flag { default: true },
        }],
        ..endpoint(
            Resource::Chat,
            Operation::Archive,
            Method::POST,
            "/v1/chats/{chatId}/archive",
        )
    },
    Endpoint {
        body: &[text("text", "messageText")],
        ..endpoint(
            Resource::Message,
            Operation::Send,
            Method::POST,
            "/v1/chats/{chatId}/messages",
        )
    },
    Endpoint {
        truncates_items: true,
        ..endpoint(
            Resource::Message,
            Operation::List,
            Method::GET,
            "/v1/chats/{chatId}/messages",
        )
    },
    Endpoint {
        query: &[q("searchQuery")],
        ..endpoint(
            Resource::Message,
            Operation::Search,
            Method::GET,
            "/v1/messages/search",
        )
    },
    Endpoint {
        query: &[q("contactQuery")],
        ..endpoint(
            Resource::Contact,
            Operation::Search,
            Method::GET,
            "/v1/accounts/{accountId}/contacts",
        )
    },
];

/// Find the endpoint for a selector
pub fn lookup(selector: OperationSelector) -> Result<&'static Endpoint> {
    ENDPOINTS
        .iter()
        .find(|e| e.selector() == selector)
        .ok_or_else(|| Error::unsupported(selector.resource.as_str(), selector.operation.as_str()))
}

impl Endpoint {
    pub fn selector(&self) -> OperationSelector {
        OperationSelector::new(self.resource, self.operation)
    }

    /// Names of the parameters spliced into the path
    pub fn path_parameters(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }

    /// Build the request for one item
    pub fn build_request(&self, params: &Parameters) -> Result<RequestDescriptor> {
        let mut request = RequestDescriptor::new(self.method, self.render_path(params)?);

        for field in self.query {
            request = request.query(field.key, params.required_string(field.parameter)?);
        }

        if !self.body.is_empty() {
            let mut body = JsonObject::new();
            for field in self.body {
                let value = match field.kind {
                    FieldKind::Text => JsonValue::String(params.required_string(field.parameter)?),
                    FieldKind::Flag { default } => {
                        JsonValue::Bool(params.boolean(field.parameter, default)?)
                    }
                };
                body.insert(field.key.to_string(), value);
            }
            request = request.json(JsonValue::Object(body));
        }

        debug!("Built {} {} for {}", request.method, request.path, self.selector());
        Ok(request)
    }

    fn render_path(&self, params: &Parameters) -> Result<String> {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Error::config(format!("Unterminated placeholder in path '{}'", self.path))
            })?;
            let name = &after[..end];
            let value = params.required_string(name)?;
            // Dot segments survive encoding and are resolved away by URL parsing
            if value == "." || value == ".." {
                return Err(Error::invalid_parameter(
                    name,
                    format!("'{value}' is not a valid path segment"),
                ));
            }
            out.push_str(&urlencoding::encode(&value));
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
