//! hmac-auth
//!
//! Operator tool for issuing signed authentication tokens, building
//! authenticated links and inspecting tokens received from callers.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use hmac_auth_core::TokenService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "hmac-auth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue a token for an account
    Issue {
        /// Account identifier
        #[arg(long)]
        account: String,
        /// Public provider alias to embed
        #[arg(long, conflicts_with = "provider")]
        alias: Option<String>,
        /// Internal provider name, replaced by its configured alias
        #[arg(long)]
        provider: Option<String>,
    },
    /// Append an authentication parameter to a URI
    Link {
        #[arg(long)]
        uri: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        alias: Option<String>,
    },
    /// Decode a token and check it against the configured key
    Inspect {
        /// Transport string
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let tokens = TokenService::from_config(&config.auth)?;

    tracing::debug!(config = ?config.auth, "Loaded configuration");

    match cli.command {
        Command::Issue {
            account,
            alias,
            provider,
        } => {
            let token =
                commands::issue(&tokens, &account, alias.as_deref(), provider.as_deref())?;
            println!("{token}");
        }
        Command::Link {
            uri,
            account,
            alias,
        } => {
            println!("{}", commands::link(&tokens, &uri, &account, alias.as_deref())?);
        }
        Command::Inspect { token } => {
            let report = commands::inspect(&tokens, &token);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report["valid"] != true {
                anyhow::bail!("token is not valid");
            }
        }
    }

    Ok(())
}
