//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Beeper Desktop API connector CLI
#[derive(Parser, Debug)]
#[command(name = "beeper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline configuration JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Base URL of the Beeper Desktop API (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API token (overrides config)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the configured credentials
    Check,

    /// Run one operation over a batch of items
    Run {
        /// Resource: account, chat, contact or message
        #[arg(short, long)]
        resource: String,

        /// Operation: list, get, create, search, archive or send
        #[arg(short, long)]
        operation: String,

        /// File containing a JSON array of items (or a single object)
        #[arg(short, long)]
        items: Option<PathBuf>,

        /// Inline items JSON
        #[arg(long)]
        items_json: Option<String>,

        /// Record failing items instead of aborting
        #[arg(long)]
        continue_on_fail: bool,
    },

    /// Print the form and credential description
    Describe,

    /// List supported resource/operation pairs
    Operations,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "beeper",
            "--base-url",
            "http://localhost:9999",
            "run",
            "-r",
            "message",
            "-o",
            "send",
            "--items-json",
            r#"[{"chatId": "c1", "messageText": "hi"}]"#,
            "--continue-on-fail",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Run {
                resource,
                operation,
                items,
                items_json,
                continue_on_fail,
            } => {
                assert_eq!(resource, "message");
                assert_eq!(operation, "send");
                assert!(items.is_none());
                assert!(items_json.unwrap().contains("chatId"));
                assert!(continue_on_fail);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["beeper", "check", "--api-token", "t", "-f", "pretty"]).unwrap();
        assert_eq!(cli.api_token.as_deref(), Some("t"));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_run_requires_selector() {
        assert!(Cli::try_parse_from(["beeper", "run", "-r", "chat"]).is_err());
    }

    #[test]
    fn test_serve_default_port() {
        let cli = Cli::try_parse_from(["beeper", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { port: 8080 }));
    }
}
