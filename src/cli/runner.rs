//! CLI runner - executes commands

use crate::auth::{credential_type, test_credentials};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ConnectorConfig;
use crate::description::node_description;
use crate::engine::Dispatcher;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::operation::{Endpoint, OperationSelector, ENDPOINTS};
use crate::types::JsonValue;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Run {
                resource,
                operation,
                items,
                items_json,
                continue_on_fail,
            } => {
                self.execute(
                    resource,
                    operation,
                    items.as_deref(),
                    items_json.as_deref(),
                    *continue_on_fail,
                )
                .await
            }
            Commands::Describe => self.describe(),
            Commands::Operations => self.operations(),
            Commands::Serve { port } => {
                let config = self.load_config()?;
                crate::cli::serve(crate::cli::ServerConfig::from(&config), *port).await
            }
        }
    }

    /// Load configuration: inline JSON, then file, then defaults.
    /// `--base-url` and `--api-token` override whatever was loaded.
    pub fn load_config(&self) -> Result<ConnectorConfig> {
        let mut config = if let Some(inline) = &self.cli.config_json {
            ConnectorConfig::parse(inline)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else if let Some(path) = &self.cli.config {
            ConnectorConfig::from_file(path)?
        } else {
            ConnectorConfig::default()
        };

        if let Some(base_url) = &self.cli.base_url {
            config.credentials.base_url.clone_from(base_url);
        }
        if let Some(token) = &self.cli.api_token {
            config.credentials.api_token.clone_from(token);
        }

        Ok(config)
    }

    fn client(config: &ConnectorConfig) -> Result<HttpClient> {
        HttpClient::with_config(config.credentials.clone(), config.http_client_config())
    }

    /// Test the credentials
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = Self::client(&config)?;

        info!("Checking connection to {}", client.base_url());

        match test_credentials(&client).await {
            Ok(()) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": "Connection successful"
                    }
                }));
                Ok(())
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": e.to_string()
                    }
                }));
                Err(e)
            }
        }
    }

    /// Run one operation over the items
    async fn execute(
        &self,
        resource: &str,
        operation: &str,
        items_path: Option<&Path>,
        items_json: Option<&str>,
        continue_on_fail: bool,
    ) -> Result<()> {
        let selector = OperationSelector::parse(resource, operation)?;
        let config = self.load_config()?;
        let items = load_items(items_path, items_json)?;

        let mut execution = config.execution_config();
        execution.continue_on_fail |= continue_on_fail;
        let dispatcher = Dispatcher::new(Self::client(&config)?).with_config(execution);

        let records = dispatcher.execute(selector, &items).await?;
        for record in &records {
            self.output_message(&json!({
                "type": "RECORD",
                "record": record
            }));
        }

        Ok(())
    }

    /// Print the form and credential description
    fn describe(&self) -> Result<()> {
        self.output_message(&json!({
            "type": "DESCRIPTION",
            "node": node_description(),
            "credential": credential_type()
        }));
        Ok(())
    }

    /// Print the supported (resource, operation) pairs
    fn operations(&self) -> Result<()> {
        for endpoint in ENDPOINTS {
            self.output_message(&endpoint_summary(endpoint));
        }
        Ok(())
    }

    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// One line of `operations` output
pub fn endpoint_summary(endpoint: &Endpoint) -> JsonValue {
    json!({
        "resource": endpoint.resource,
        "operation": endpoint.operation,
        "method": endpoint.method,
        "path": endpoint.path,
        "pathParameters": endpoint.path_parameters(),
        "query": endpoint.query.iter().map(|f| f.parameter).collect::<Vec<_>>(),
        "body": endpoint.body.iter().map(|f| f.parameter).collect::<Vec<_>>()
    })
}

/// Load input items: inline JSON first, then a file. With neither, the
/// batch is a single empty item.
pub fn load_items(path: Option<&Path>, inline: Option<&str>) -> Result<Vec<JsonValue>> {
    if let Some(json_str) = inline {
        return parse_items(json_str);
    }

    if let Some(path) = path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read items file {}", path.display()))?;
        return parse_items(&content);
    }

    Ok(vec![json!({})])
}

/// Parse items from JSON: an array of items or a single item object
pub fn parse_items(content: &str) -> Result<Vec<JsonValue>> {
    let value: JsonValue = serde_json::from_str(content)
        .map_err(|e| Error::config(format!("Invalid items JSON: {e}")))?;
    match value {
        JsonValue::Array(items) => Ok(items),
        item @ JsonValue::Object(_) => Ok(vec![item]),
        _ => Err(Error::config(
            "Items must be a JSON array or a single JSON object",
        )),
    }
}
