//! desk - Command-line client for the Desk messaging API
//!
//! Entry point for the desk application.

use clap::Parser;
use desk_client::cli::{Cli, Commands, ConfigCommands, PutMetadataArgs, SendHsmArgs};
use desk_client::config::{Config, LogFormat, LogLevel, LoggingConfig};
use desk_client::{DeskClient, DeskError, HsmMessage};
use serde::Serialize;
use std::collections::HashMap;
use std::process::ExitCode;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    init_logging(&cli, &config.logging);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// clean for command output.
///
/// Level priority: -v/-q flags, then RUST_LOG, then the config file.
fn init_logging(cli: &Cli, logging: &LoggingConfig) {
    let directive = |level: LogLevel| -> Directive { tracing::Level::from(level).into() };
    let filter = match cli.log_level_override() {
        Some(level) => EnvFilter::default().add_directive(directive(level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(directive(logging.level))),
    };

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Main application logic.
fn run(cli: &Cli, config: &Config) -> desk_client::Result<()> {
    if let Commands::Config(subcmd) = &cli.command {
        return cmd_config(cli, config, subcmd);
    }

    if config.desk.api_token.as_deref().unwrap_or_default().is_empty() {
        tracing::warn!("No API token configured; requests will be sent with an empty key");
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| DeskError::internal_with_source("Failed to create async runtime", e))?;

    runtime.block_on(async {
        let client = DeskClient::from_config(&config.desk)?;
        tracing::debug!(base_url = %client.base_url(), "Desk client ready");

        match &cli.command {
            Commands::Ping => {
                println!("{}", client.ping().await?);
                Ok(())
            }
            Commands::Accounts => print_json(&client.accounts().await?),
            Commands::Agents => print_json(&client.agents().await?),
            Commands::SendHsm(args) => cmd_send_hsm(&client, args).await,
            Commands::PutMetadata(args) => cmd_put_metadata(&client, args).await,
            Commands::Ticket(args) => print_json(&client.get_ticket(&args.ticket_id).await?),
            Commands::Config(_) => unreachable!("handled before the runtime starts"),
        }
    })
}

/// Handle the `send-hsm` command.
async fn cmd_send_hsm(client: &DeskClient, args: &SendHsmArgs) -> desk_client::Result<()> {
    let mut message = HsmMessage::new(
        &args.account,
        &args.phone,
        &args.template,
        args.parameters.iter().cloned(),
    )
    .close_ticket(args.close_ticket);

    if let Some(header) = &args.header {
        message = message.with_header(header.clone());
    }

    let result = if args.has_campaign() {
        if args.campaign_id.is_none() || args.entry_id.is_none() {
            tracing::warn!(
                "--campaign-id and --entry-id are only sent together; sending without campaign"
            );
        }
        client
            .send_hsm_v2(&message, args.campaign_id.as_deref(), args.entry_id.as_deref())
            .await?
    } else {
        client.send_hsm(&message).await?
    };

    print_json(&result)
}

/// Handle the `put-metadata` command.
async fn cmd_put_metadata(client: &DeskClient, args: &PutMetadataArgs) -> desk_client::Result<()> {
    let metadata: HashMap<String, String> = args.entries.iter().cloned().collect();

    tracing::info!(
        entity = %args.entity,
        id = %args.id,
        keys = metadata.len(),
        "Updating metadata"
    );

    print_json(&client.put_metadata(args.entity, &args.id, &metadata).await?)
}

/// Handle the `config` subcommand.
fn cmd_config(cli: &Cli, config: &Config, subcmd: &ConfigCommands) -> desk_client::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            // load_config already validated; reaching here means it passed
            println!("✓ Configuration is valid");
            tracing::debug!(path = ?cli.config, "Validated configuration");
            Ok(())
        }
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(&config.redacted()).map_err(|e| {
                DeskError::config_with_source("Failed to serialize configuration", e)
            })?;
            println!("{}", yaml);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> desk_client::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> desk_client::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(token) = &cli.token {
        config.desk.api_token = Some(token.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.desk.base_url = base_url.clone();
    }

    config.validate()?;
    Ok(config)
}
