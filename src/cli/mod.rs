//! CLI module
//!
//! Command-line interface for the Beeper connector.
//!
//! # Commands
//!
//! - `check` - Test the credentials against `GET /v1/accounts`
//! - `run` - Run one resource/operation over a batch of items
//! - `describe` - Print the form and credential description
//! - `operations` - List supported resource/operation pairs
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{load_items, parse_items, Runner};
pub use server::{router, serve, ServerConfig};
