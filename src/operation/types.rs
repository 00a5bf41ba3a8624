//! Resource and operation selectors

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// API entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Account,
    Chat,
    Contact,
    Message,
}

impl Resource {
    /// All resources, in form order
    pub const ALL: [Resource; 4] = [
        Resource::Account,
        Resource::Chat,
        Resource::Contact,
        Resource::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Account => "account",
            Resource::Chat => "chat",
            Resource::Contact => "contact",
            Resource::Message => "message",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::UnknownResource {
                resource: s.to_string(),
            })
    }
}

/// Action performed against a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Get,
    Create,
    Search,
    Archive,
    Send,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Search,
        Operation::Archive,
        Operation::Send,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Search => "search",
            Operation::Archive => "archive",
            Operation::Send => "send",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| Error::UnknownOperation {
                operation: s.to_string(),
            })
    }
}

/// The (resource, operation) pair active for a whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationSelector {
    pub resource: Resource,
    pub operation: Operation,
}

impl OperationSelector {
    pub fn new(resource: Resource, operation: Operation) -> Self {
        Self {
            resource,
            operation,
        }
    }

    /// Parse a selector from the form's string values
    pub fn parse(resource: &str, operation: &str) -> Result<Self> {
        Ok(Self::new(resource.parse()?, operation.parse()?))
    }
}

impl std::fmt::Display for OperationSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.operation, self.resource)
    }
}
