//! Tabletop - Command-line client for the shared board
//!
//! Usage:
//!   tabletop init --document-id <ID>
//!   tabletop add 🐉 --name Dragon --x 120 --y 80
//!   tabletop watch
//!
//! The access key is read from the settings file or `TABLETOP_ACCESS_KEY`.

mod commands;
mod settings;
mod view;

use anyhow::{Context, Result};
use board_store::HttpDocumentStore;
use board_sync::SyncEngine;
use clap::Parser;
use commands::Command;
use settings::{SettingsManager, DEFAULT_SETTINGS_FILE};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shared tabletop board client
#[derive(Parser, Debug)]
#[command(name = "tabletop")]
#[command(about = "Edit and follow a shared tabletop board")]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut settings = SettingsManager::new(&cli.settings);
    settings.load()?;
    if commands::run_local(&cli.command, &mut settings)? {
        return Ok(());
    }

    let app = settings.get();
    let store = HttpDocumentStore::new(app.remote.clone()).with_context(|| {
        format!(
            "invalid remote settings in {} (run `tabletop init` first)",
            settings.settings_path().display()
        )
    })?;
    tracing::debug!(url = %app.remote.document_url(), "using remote board");

    let engine = SyncEngine::new(store, app.sync.clone());
    commands::run(&engine, cli.command).await
}
