mod profile;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::session::SessionCommands;

#[derive(Debug, Parser)]
#[command(name = "igscan")]
#[command(about = "Derive account features from an Instagram profile")]
struct Cli {
    /// Override the session store directory
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a profile and print its feature record as JSON
    Profile {
        /// Target account; prompted for on stdin when omitted
        username: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Manage the stored session for the login account
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = igscan_core::load_app_config()?;
    if let Some(dir) = cli.session_dir {
        config.session_dir = dir;
    }
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Profile { username, pretty } => {
            profile::run_profile(&config, username, pretty).await
        }
        Commands::Session { command } => {
            session::run_session(&config, command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
