//! Command implementations
//!
//! Every command works against a [`SyncEngine`] so it can run over the HTTP
//! store in production and the in-memory store in tests.

use crate::settings::SettingsManager;
use crate::view::{print_items, ConsoleView};
use anyhow::{bail, Context, Result};
use board_model::{Item, LayoutDiff};
use board_store::DocumentStore;
use board_sync::{FlushOutcome, LocalView, PullLoop, SyncEngine};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Board commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a settings file pointing at a board document
    Init {
        /// Identifier of the board document
        #[arg(long)]
        document_id: String,
        /// Base URL of the store API
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Show every item on the board
    List,
    /// Place an emoji token
    Add {
        /// Emoji shown for the token
        emoji: String,
        /// Display name
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        /// Fill color, e.g. "#ff0000"
        #[arg(long)]
        color: Option<String>,
    },
    /// Place a free text note
    Note {
        text: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },
    /// Move an item
    Move {
        id: String,
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// Remove an item
    Remove { id: String },
    /// Merge the remote board into a local layout file
    Sync {
        /// JSON file holding the local layout; a missing file is an empty layout
        #[arg(long, default_value = "layout.json")]
        layout: PathBuf,
    },
    /// Clear the whole board
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Follow remote changes until interrupted
    Watch {
        /// Seconds between pulls (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Show sync status
    Status,
}

/// Handle commands that only touch the settings file.
///
/// Returns false if `command` needs the board.
pub fn run_local(command: &Command, settings: &mut SettingsManager) -> Result<bool> {
    match command {
        Command::Init { document_id, base_url } => {
            let mut updated = settings.get().clone();
            updated.remote.document_id = document_id.clone();
            if let Some(url) = base_url {
                updated.remote.base_url = url.clone();
            }
            settings.update(updated)?;
            println!("Wrote {}", settings.settings_path().display());
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Run a board command
pub async fn run<S>(engine: &SyncEngine<S>, command: Command) -> Result<()>
where
    S: DocumentStore + 'static,
{
    match command {
        Command::Init { .. } => bail!("init does not operate on the board"),
        Command::List => {
            let items = engine.load_items().await;
            print_items(&items);
        }
        Command::Add { emoji, name, x, y, color } => {
            let mut item = Item::new(name, emoji, x, y);
            if let Some(color) = color {
                item = item.with_color(color);
            }
            let id = item.id.clone();
            engine.add_item(item).await;
            finish(engine).await?;
            println!("{}", id);
        }
        Command::Note { text, x, y } => {
            let item = Item::text_note(text, x, y);
            let id = item.id.clone();
            engine.add_item(item).await;
            finish(engine).await?;
            println!("{}", id);
        }
        Command::Move { id, x, y } => {
            if !engine.load().await.contains(&id) {
                tracing::warn!(%id, "item not on the board, move will have no effect");
            }
            engine.update_item(&id, x, y).await;
            finish(engine).await?;
        }
        Command::Remove { id } => {
            if !engine.remove_item(&id).await {
                bail!("failed to remove {}", id);
            }
        }
        Command::Sync { layout } => {
            let local = read_layout(&layout).await?;
            let merged = engine.sync_items(local.clone()).await;
            let diff = LayoutDiff::between(&local, &merged);
            if !diff.is_empty() {
                write_layout(&layout, &merged).await?;
            }
            println!("{}", diff.summary());
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to clear the board without --yes");
            }
            engine.reset_all().await;
            let status = engine.status();
            if let Some(error) = status.last_error {
                bail!("reset did not reach the store: {}", error);
            }
            println!("Board cleared");
        }
        Command::Watch { interval } => {
            let view = Arc::new(ConsoleView::new(engine.load_items().await));
            print_items(&view.snapshot());

            let pull = match interval {
                Some(secs) => PullLoop::spawn(
                    engine.clone(),
                    Arc::clone(&view),
                    Duration::from_secs(secs.max(1)),
                ),
                None => engine.spawn_pull_loop(Arc::clone(&view)),
            };

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for interrupt")?;
            pull.stop();
            engine.shutdown().await;
        }
        Command::Status => {
            engine.load().await;
            let status = engine.status();
            println!("{}", status.status_message());
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}

/// Flush queued edits before the process exits
async fn finish<S>(engine: &SyncEngine<S>) -> Result<()>
where
    S: DocumentStore + 'static,
{
    match engine.shutdown().await {
        FlushOutcome::Written { version, .. } => {
            tracing::info!(%version, "saved");
            Ok(())
        }
        FlushOutcome::Skipped(reason) => {
            tracing::debug!(?reason, "nothing to save");
            Ok(())
        }
        FlushOutcome::Failed { error, .. } => bail!("failed to save the board: {}", error),
    }
}

async fn read_layout(path: &Path) -> Result<Vec<Item>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid layout in {}", path.display()))
}

async fn write_layout(path: &Path, items: &[Item]) -> Result<()> {
    let content = serde_json::to_string_pretty(items)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
