//! `igscan session`: inspect and seed the stored session out-of-band.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use igscan_client::Session;
use igscan_core::{AppConfig, ConfigError};
use igscan_profiler::{FileSessionStore, SessionStore};

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Store a serialized session for IG_USERNAME, e.g. one exported elsewhere
    Import {
        /// File containing the session blob
        file: PathBuf,
    },
    /// Delete the stored session for IG_USERNAME
    Clear,
}

pub(crate) fn run_session(config: &AppConfig, command: SessionCommands) -> anyhow::Result<()> {
    let username = config
        .login_username
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("IG_USERNAME".to_string()))?;
    let store = FileSessionStore::new(&config.session_dir);

    match command {
        SessionCommands::Import { file } => import_session(&store, username, &file),
        SessionCommands::Clear => {
            if store.remove(username)? {
                println!("removed stored session for {username}");
            } else {
                println!("no stored session for {username}");
            }
            Ok(())
        }
    }
}

/// Validates the blob in `file` and writes it to `store` under `username`.
pub(crate) fn import_session<S: SessionStore + ?Sized>(
    store: &S,
    username: &str,
    file: &Path,
) -> anyhow::Result<()> {
    let blob = std::fs::read_to_string(file)
        .with_context(|| format!("reading session file {}", file.display()))?;
    let session = Session::from_blob(&blob).context("file does not contain a session")?;
    if !session.is_bound_to(username) {
        anyhow::bail!(
            "session belongs to {}, not {username}; refusing to import",
            session.username()
        );
    }

    store.save(username, blob.trim())?;
    tracing::info!(username, "session imported");
    println!("imported session for {username}");
    Ok(())
}
