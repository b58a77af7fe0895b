//! Integrations Console - terminal front end for the platform integrations pages
//!
//! Lists and deletes saved credentials (with the confirmation flow the
//! platform requires for credentials still in use), and runs library agents
//! with a single prompt.

mod api;
mod app;
mod i18n;
mod prompt;
mod providers;
mod state;
mod views;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use integrations_core::{ConsoleConfig, DeletionStatus};

use app::{App, ConfirmMode};

#[derive(Parser)]
#[command(name = "integrations-console")]
#[command(about = "Manage platform integrations and run library agents")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/integrations-console/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Saved credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
    /// Library agents
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },
    /// Show the credential IDs hidden from the table
    Hidden,
}

#[derive(Subcommand)]
enum CredentialsAction {
    /// List saved credentials
    List,
    /// Delete a saved credential
    Delete {
        /// Provider key (e.g. github)
        #[arg(short, long)]
        provider: String,
        /// Credential ID
        #[arg(short, long)]
        id: String,
        /// Skip the server-side in-use check
        #[arg(short, long)]
        force: bool,
        /// Answer "Continue" to the confirmation dialog
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AgentsAction {
    /// List library agents, most recently edited first
    List,
    /// Run an agent with a prompt
    Run {
        /// Agent (graph) ID; asks interactively when omitted
        #[arg(short, long)]
        agent: Option<String>,
        /// Prompt text; asks interactively when omitted
        #[arg(short, long)]
        prompt: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(ConsoleConfig::default_path);
    let config =
        ConsoleConfig::load_from_path(&path)?.with_overrides(|name| std::env::var(name).ok());
    tracing::debug!(base_url = %config.base_url, "Starting Integrations Console");

    let mut app = App::new(config);

    match cli.command {
        Commands::Credentials { action } => match action {
            CredentialsAction::List => app.list_credentials().await?,
            CredentialsAction::Delete {
                provider,
                id,
                force,
                yes,
            } => {
                let mode = if yes {
                    ConfirmMode::AssumeYes
                } else {
                    ConfirmMode::Ask
                };
                let status = app.delete_credential(&provider, &id, force, mode).await?;
                if matches!(status, DeletionStatus::Failed(_) | DeletionStatus::Unrecognized) {
                    std::process::exit(1);
                }
            }
        },
        Commands::Agents { action } => match action {
            AgentsAction::List => app.list_agents().await?,
            AgentsAction::Run { agent, prompt } => app.run_agent(agent, prompt).await?,
        },
        Commands::Hidden => app.show_hidden(),
    }

    Ok(())
}
