//! Command-line interface definition for desk.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use crate::client::EntityType;
use crate::config::LogLevel;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// desk - Command-line client for the Desk messaging API
#[derive(Debug, Parser)]
#[command(name = "desk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "DESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// API token (overrides config and DESK_API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL (overrides config and DESK_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level forced by -v/-q, if any.
    pub fn log_level_override(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }

        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check connectivity and credentials
    Ping,

    /// List all accounts
    Accounts,

    /// List all agents
    Agents,

    /// Send a templated (HSM) message
    SendHsm(SendHsmArgs),

    /// Replace metadata on a client or ticket
    PutMetadata(PutMetadataArgs),

    /// Fetch a ticket
    Ticket(TicketArgs),

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `send-hsm` subcommand.
#[derive(Debug, Args)]
pub struct SendHsmArgs {
    /// Sending account
    #[arg(short, long)]
    pub account: String,

    /// Recipient phone number
    #[arg(short, long)]
    pub phone: String,

    /// Template name
    #[arg(short, long)]
    pub template: String,

    /// Template parameter (repeat in positional order)
    #[arg(long = "param")]
    pub parameters: Vec<String>,

    /// Close the ticket after sending
    #[arg(long)]
    pub close_ticket: bool,

    /// Template header as a JSON object
    #[arg(long, value_parser = parse_json)]
    pub header: Option<Value>,

    /// Campaign ID (sent only together with --entry-id)
    #[arg(long)]
    pub campaign_id: Option<String>,

    /// Campaign entry ID (sent only together with --campaign-id)
    #[arg(long)]
    pub entry_id: Option<String>,
}

impl SendHsmArgs {
    /// Whether any campaign correlation flag was given.
    pub fn has_campaign(&self) -> bool {
        self.campaign_id.is_some() || self.entry_id.is_some()
    }
}

/// Arguments for the `put-metadata` subcommand.
#[derive(Debug, Args)]
pub struct PutMetadataArgs {
    /// Entity type (client, ticket)
    #[arg(short, long, value_parser = parse_entity)]
    pub entity: EntityType,

    /// Entity identifier
    #[arg(short, long)]
    pub id: String,

    /// Metadata entry as KEY=VALUE (repeatable)
    #[arg(short = 's', long = "set", value_parser = parse_key_value, required = true)]
    pub entries: Vec<(String, String)>,
}

/// Arguments for the `ticket` subcommand.
#[derive(Debug, Args)]
pub struct TicketArgs {
    /// Ticket ID
    pub ticket_id: String,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show the effective configuration (token masked)
    Show,
}

fn parse_entity(s: &str) -> Result<EntityType, String> {
    s.parse().map_err(|e: crate::DeskError| e.to_string())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid metadata entry '{}'. Expected KEY=VALUE", s)),
    }
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("Invalid JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_debug() {
        // Verify CLI can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ping_command() {
        let cli = Cli::parse_from(["desk", "ping"]);
        assert!(matches!(cli.command, Commands::Ping));
        assert!(cli.token.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_list_commands() {
        let cli = Cli::parse_from(["desk", "accounts"]);
        assert!(matches!(cli.command, Commands::Accounts));

        let cli = Cli::parse_from(["desk", "agents"]);
        assert!(matches!(cli.command, Commands::Agents));
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "desk",
            "ping",
            "--token",
            "abc",
            "--base-url",
            "http://localhost:9000",
            "-c",
            "/etc/desk.yaml",
        ]);

        assert_eq!(cli.token, Some("abc".to_string()));
        assert_eq!(cli.base_url, Some("http://localhost:9000".to_string()));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/desk.yaml")));
    }

    #[test]
    fn test_send_hsm_command() {
        let cli = Cli::parse_from([
            "desk",
            "send-hsm",
            "-a",
            "acme",
            "-p",
            "+56911112222",
            "-t",
            "welcome",
            "--param",
            "Ana",
            "--param",
            "42",
            "--header",
            r#"{"type":"text","text":"Hi"}"#,
        ]);

        match cli.command {
            Commands::SendHsm(args) => {
                assert_eq!(args.account, "acme");
                assert_eq!(args.phone, "+56911112222");
                assert_eq!(args.template, "welcome");
                assert_eq!(args.parameters, vec!["Ana", "42"]);
                assert!(!args.close_ticket);
                assert_eq!(args.header, Some(json!({"type": "text", "text": "Hi"})));
                assert!(!args.has_campaign());
            }
            _ => panic!("Expected SendHsm command"),
        }
    }

    #[test]
    fn test_send_hsm_campaign() {
        let cli = Cli::parse_from([
            "desk",
            "send-hsm",
            "-a",
            "acme",
            "-p",
            "+569",
            "-t",
            "promo",
            "--campaign-id",
            "c-1",
            "--close-ticket",
        ]);

        match cli.command {
            Commands::SendHsm(args) => {
                assert!(args.close_ticket);
                assert!(args.parameters.is_empty());
                assert_eq!(args.campaign_id, Some("c-1".to_string()));
                assert!(args.entry_id.is_none());
                assert!(args.has_campaign());
            }
            _ => panic!("Expected SendHsm command"),
        }
    }

    #[test]
    fn test_send_hsm_bad_header() {
        let result = Cli::try_parse_from([
            "desk", "send-hsm", "-a", "acme", "-p", "+569", "-t", "promo", "--header", "{oops",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_put_metadata_command() {
        let cli = Cli::parse_from([
            "desk",
            "put-metadata",
            "--entity",
            "client",
            "--id",
            "123",
            "--set",
            "k=v",
            "--set",
            "plan=gold=plus",
        ]);

        match cli.command {
            Commands::PutMetadata(args) => {
                assert_eq!(args.entity, EntityType::Client);
                assert_eq!(args.id, "123");
                assert_eq!(
                    args.entries,
                    vec![
                        ("k".to_string(), "v".to_string()),
                        ("plan".to_string(), "gold=plus".to_string()),
                    ]
                );
            }
            _ => panic!("Expected PutMetadata command"),
        }
    }

    #[test]
    fn test_put_metadata_rejects_bad_input() {
        let result = Cli::try_parse_from([
            "desk", "put-metadata", "-e", "order", "-i", "1", "-s", "k=v",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "desk", "put-metadata", "-e", "ticket", "-i", "1", "-s", "novalue",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["desk", "put-metadata", "-e", "ticket", "-i", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ticket_command() {
        let cli = Cli::parse_from(["desk", "ticket", "t-42"]);

        match cli.command {
            Commands::Ticket(args) => assert_eq!(args.ticket_id, "t-42"),
            _ => panic!("Expected Ticket command"),
        }
    }

    #[test]
    fn test_config_commands() {
        let cli = Cli::parse_from(["desk", "config", "validate"]);
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Validate)));

        let cli = Cli::parse_from(["desk", "config", "show"]);
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));
    }

    #[test]
    fn test_verbose_levels() {
        let cli = Cli::parse_from(["desk", "ping"]);
        assert_eq!(cli.log_level_override(), None);

        let cli = Cli::parse_from(["desk", "-v", "ping"]);
        assert_eq!(cli.log_level_override(), Some(LogLevel::Debug));

        let cli = Cli::parse_from(["desk", "-vv", "ping"]);
        assert_eq!(cli.log_level_override(), Some(LogLevel::Trace));
    }

    #[test]
    fn test_quiet_mode() {
        let cli = Cli::parse_from(["desk", "-q", "ping"]);
        assert_eq!(cli.log_level_override(), Some(LogLevel::Error));
    }
}
