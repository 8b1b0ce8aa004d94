//! Contact Chat - interactive CLI
//!
//! Menu-driven contact book with a simulated chat, run on stdin/stdout.

use anyhow::{Context, Result};
use clap::Parser;
use contact_chat::chatlog::ChatLog;
use contact_chat::config::Config;
use contact_chat::contacts::ContactStore;
use contact_chat::reply::ReplySelector;
use contact_chat::session::Session;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Contact book with a simulated chat
#[derive(Parser)]
#[command(name = "contact-chat")]
#[command(about = "Store contacts and chat with them (simulated replies)")]
struct Cli {
    /// Directory holding contacts.json and the chats/ logs
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the menu
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = Config::with_data_dir(&cli.data_dir);

    if config
        .ensure_dirs()
        .with_context(|| format!("Failed to prepare {}", config.data_dir.display()))?
    {
        info!("Created chat directory at {}", config.chats_dir.display());
    }

    let mut store = ContactStore::new(&config);
    let count = store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;
    if count == 0 {
        info!("No contacts found. Starting with an empty contact list.");
    } else {
        info!("Loaded {} contacts", count);
    }

    let stdin = io::stdin();
    let mut session = Session::new(
        store,
        ChatLog::new(&config),
        ReplySelector::new(rand::thread_rng()),
        stdin.lock(),
        io::stdout(),
    );
    session.run().context("Session aborted")?;

    Ok(())
}
