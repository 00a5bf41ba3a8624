//! Form description exposed to the invoking host
//!
//! Declares the selectable resources and operations and every per-operation
//! field, with the display rules that decide which fields show for which
//! (resource, operation). Serializes to camelCase JSON.

use crate::operation::{Operation, OperationSelector, Resource};
use crate::parameters::{DEFAULT_LIMIT, LIMIT_MAX, LIMIT_MIN};
use crate::types::{JsonValue, PropertyType};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

// ============================================================================
// Property model
// ============================================================================

/// One form property
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    pub default: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PropertyOptions>,
}

/// Extra rendering hints for a property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u64>,
}

/// Visibility rule: every listed key must match one of its values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<&'static str, Vec<&'static str>>,
}

/// Choices of an `options` property or nested fields of a `collection`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyOptions {
    Choices(Vec<OptionValue>),
    Fields(Vec<Property>),
}

/// One selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue {
    pub name: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
}

impl OptionValue {
    fn plain(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value,
            description: None,
            action: None,
        }
    }

    fn operation(
        name: &'static str,
        value: &'static str,
        description: &'static str,
        action: &'static str,
    ) -> Self {
        Self {
            name,
            value,
            description: Some(description),
            action: Some(action),
        }
    }
}

impl Property {
    pub fn new(display_name: &'static str, name: &'static str, kind: PropertyType) -> Self {
        Self {
            display_name,
            name,
            kind,
            required: false,
            no_data_expression: false,
            default: JsonValue::Null,
            placeholder: None,
            description: None,
            type_options: None,
            display_options: None,
            options: None,
        }
    }

    /// Required string field with an empty default
    fn text(display_name: &'static str, name: &'static str) -> Self {
        Self::new(display_name, name, PropertyType::String)
            .required()
            .default_value(json!(""))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: JsonValue) -> Self {
        self.default = value;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Mask the value in the UI
    #[must_use]
    pub fn password(mut self) -> Self {
        self.type_options.get_or_insert_with(TypeOptions::default).password = Some(true);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.type_options.get_or_insert_with(TypeOptions::default).rows = Some(rows);
        self
    }

    #[must_use]
    pub fn range(mut self, min: u64, max: u64) -> Self {
        let opts = self.type_options.get_or_insert_with(TypeOptions::default);
        opts.min_value = Some(min);
        opts.max_value = Some(max);
        self
    }

    /// Show only for the given resources (and operations, when non-empty)
    #[must_use]
    pub fn show_for(mut self, resources: &[Resource], operations: &[Operation]) -> Self {
        let mut show: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        show.insert("resource", resources.iter().map(|r| r.as_str()).collect());
        if !operations.is_empty() {
            show.insert("operation", operations.iter().map(|o| o.as_str()).collect());
        }
        self.display_options = Some(DisplayOptions { show });
        self
    }

    #[must_use]
    pub fn choices(mut self, choices: Vec<OptionValue>) -> Self {
        self.options = Some(PropertyOptions::Choices(choices));
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: Vec<Property>) -> Self {
        self.options = Some(PropertyOptions::Fields(fields));
        self
    }

    /// Whether the property shows for a resource (and optionally operation)
    pub fn is_visible(&self, resource: Resource, operation: Option<Operation>) -> bool {
        let Some(display) = &self.display_options else {
            return true;
        };
        display.show.iter().all(|(key, values)| match *key {
            "resource" => values.contains(&resource.as_str()),
            "operation" => operation.map_or(true, |op| values.contains(&op.as_str())),
            _ => true,
        })
    }

    /// Choices of an `options` property
    pub fn choice_values(&self) -> &[OptionValue] {
        match &self.options {
            Some(PropertyOptions::Choices(choices)) => choices,
            _ => &[],
        }
    }
}

// ============================================================================
// Node description
// ============================================================================

/// Reference to a credential type the node needs
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRef {
    pub name: &'static str,
    pub required: bool,
}

/// The whole form surface of the connector
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub defaults: JsonValue,
    pub usable_as_tool: bool,
    pub credentials: Vec<CredentialRef>,
    pub properties: Vec<Property>,
}

impl NodeDescription {
    /// The `operation` property shown for a resource
    pub fn operation_property(&self, resource: Resource) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name == "operation" && p.is_visible(resource, None))
    }

    /// Operation choices offered for a resource
    pub fn operations(&self, resource: Resource) -> &[OptionValue] {
        self.operation_property(resource)
            .map(Property::choice_values)
            .unwrap_or_default()
    }

    /// Per-operation fields shown for a selector, in form order
    pub fn visible_fields(&self, selector: OperationSelector) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.name != "resource" && p.name != "operation")
            .filter(|p| p.is_visible(selector.resource, Some(selector.operation)))
            .collect()
    }
}

/// Form description of the Beeper connector
pub fn node_description() -> NodeDescription {
    use Operation::{Archive, Create, Get, List, Search, Send};
    use Resource::{Account, Chat, Contact, Message};

    let resource = Property::new("Resource", "resource", PropertyType::Options)
        .no_data_expression()
        .choices(vec![
            OptionValue::plain("Account", "account"),
            OptionValue::plain("Chat", "chat"),
            OptionValue::plain("Contact", "contact"),
            OptionValue::plain("Message", "message"),
        ])
        .default_value(json!("message"));

    let operation = |resource: Resource, default: Operation, choices: Vec<OptionValue>| {
        Property::new("Operation", "operation", PropertyType::Options)
            .no_data_expression()
            .show_for(&[resource], &[])
            .choices(choices)
            .default_value(json!(default.as_str()))
    };

    let properties = vec![
        resource,
        operation(
            Account,
            List,
            vec![OptionValue::operation(
                "List",
                "list",
                "List all connected accounts",
                "List all accounts",
            )],
        ),
        operation(
            Chat,
            List,
            vec![
                OptionValue::operation(
                    "Archive",
                    "archive",
                    "Archive or unarchive a chat",
                    "Archive a chat",
                ),
                OptionValue::operation("Create", "create", "Create a new chat", "Create a chat"),
                OptionValue::operation(
                    "Get",
                    "get",
                    "Get details of a specific chat",
                    "Get a chat",
                ),
                OptionValue::operation("List", "list", "List all chats", "List all chats"),
                OptionValue::operation("Search", "search", "Search for chats", "Search chats"),
            ],
        ),
        operation(
            Contact,
            Search,
            vec![OptionValue::operation(
                "Search",
                "search",
                "Search for contacts",
                "Search contacts",
            )],
        ),
        operation(
            Message,
            Send,
            vec![
                OptionValue::operation("List", "list", "List messages in a chat", "List messages"),
                OptionValue::operation(
                    "Search",
                    "search",
                    "Search for messages",
                    "Search messages",
                ),
                OptionValue::operation(
                    "Send",
                    "send",
                    "Send a message to a chat",
                    "Send a message",
                ),
            ],
        ),
        // Chat parameters
        Property::text("Chat ID", "chatId")
            .show_for(&[Chat], &[Get, Archive])
            .description("The ID of the chat"),
        Property::text("Account ID", "accountId")
            .show_for(&[Chat], &[Create])
            .description("The ID of the account to create the chat in"),
        Property::text("Recipient", "recipient")
            .show_for(&[Chat], &[Create])
            .description("The recipient identifier (phone number, username, etc.)"),
        Property::new("Archive", "archive", PropertyType::Boolean)
            .default_value(json!(true))
            .show_for(&[Chat], &[Archive])
            .description("Whether to archive (true) or unarchive (false) the chat"),
        Property::text("Search Query", "searchQuery")
            .show_for(&[Chat], &[Search])
            .description("The search query for finding chats"),
        // Message parameters
        Property::text("Chat ID", "chatId")
            .show_for(&[Message], &[Send, List])
            .description("The ID of the chat"),
        Property::text("Message Text", "messageText")
            .rows(4)
            .show_for(&[Message], &[Send])
            .description("The text of the message to send"),
        Property::text("Search Query", "searchQuery")
            .show_for(&[Message], &[Search])
            .description("The search query for finding messages"),
        // Contact parameters
        Property::text("Account ID", "accountId")
            .show_for(&[Contact], &[Search])
            .description("The ID of the account to search contacts in"),
        Property::text("Search Query", "contactQuery")
            .show_for(&[Contact], &[Search])
            .description("The search query for finding contacts"),
        // Additional options
        Property::new("Options", "options", PropertyType::Collection)
            .placeholder("Add Option")
            .default_value(json!({}))
            .show_for(&[Chat, Message], &[List])
            .fields(vec![Property::new("Limit", "limit", PropertyType::Number)
                .range(LIMIT_MIN, LIMIT_MAX)
                .default_value(json!(DEFAULT_LIMIT))
                .description("Max number of results to return")]),
    ];

    NodeDescription {
        display_name: "Beeper",
        name: "beeper",
        group: vec!["output"],
        version: 1,
        subtitle: "={{$parameter[\"operation\"] + \": \" + $parameter[\"resource\"]}}",
        description: "Interact with Beeper Desktop API to manage chats and messages",
        defaults: json!({ "name": "Beeper" }),
        usable_as_tool: true,
        credentials: vec![CredentialRef {
            name: "beeperApi",
            required: true,
        }],
        properties,
    }
}
