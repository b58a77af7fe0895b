//! Integrations CLI - offline inspection of the integrations configuration.
//!
//! This binary prints JSON so it can be consumed by scripts.

use clap::{Parser, Subcommand};
use integrations_core::{
    resolve_hidden_ids, ApiResponse, ConsoleConfig, CredentialsAggregator, HiddenCredentialKey,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "integrations")]
#[command(about = "Integrations CLI - hidden credential and config inspection")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the console config path)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hidden credential commands
    Hidden {
        #[command(subcommand)]
        action: HiddenAction,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
enum HiddenAction {
    /// List the resolved hidden credential IDs
    List,
    /// List the recognized configuration keys
    Keys,
    /// Check whether a credential ID would be hidden
    Check {
        /// Credential ID
        #[arg(short, long)]
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(ConsoleConfig::default_path);
    let config = match ConsoleConfig::load_from_path(&path) {
        Ok(config) => config.with_overrides(|name| std::env::var(name).ok()),
        Err(e) => {
            print_json(&ApiResponse::<()>::err(e.to_string()));
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Hidden { action } => handle_hidden(action, &config),
        Commands::Config => {
            let mut shown = config.clone();
            shown.api_key = shown.api_key.map(|_| "********".to_string());
            print_json(&ApiResponse::ok(json!({
                "path": path,
                "config": shown,
            })));
        }
    }
}

fn handle_hidden(action: HiddenAction, config: &ConsoleConfig) {
    let hidden = resolve_hidden_ids(&config.hidden_credentials);

    match action {
        HiddenAction::List => print_json(&ApiResponse::ok(json!({
            "source": hidden.source(),
            "ids": hidden.ids(),
        }))),
        HiddenAction::Keys => {
            let keys: Vec<_> = HiddenCredentialKey::ALL
                .iter()
                .map(|key| {
                    json!({
                        "key": key,
                        "env": format!("HIDDEN_CRED_{}", key.env_suffix()),
                        "configured": config.hidden_credentials.get(*key),
                    })
                })
                .collect();
            print_json(&ApiResponse::ok(json!({ "keys": keys })));
        }
        HiddenAction::Check { id } => {
            let aggregator = CredentialsAggregator::new(hidden);
            print_json(&ApiResponse::ok(json!({
                "id": id,
                "hidden": aggregator.is_hidden(&id),
            })));
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}
