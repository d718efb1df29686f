//! PageRelay - relay page text into AI chat front-ends over CDP.
//!
//! Main entry point for the PageRelay CLI.

mod cli;
mod cmd_config;
mod cmd_history;
mod cmd_send;
mod cmd_track;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagerelay_engine as engine;
use pagerelay_store::SqliteStore;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagerelay=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Creating data directory {}", parent.display()))?;
    }
    let store = SqliteStore::open(&db_path)
        .await
        .with_context(|| format!("Opening database {}", db_path.display()))?;

    match cli.command {
        Commands::Send {
            engine,
            text,
            from_url,
            raw,
        } => cmd_send::run(&cli.cdp, store, engine, text, from_url, raw).await,
        Commands::Track { url } => cmd_track::run(&cli.cdp, store, &url).await,
        Commands::History { action } => cmd_history::run(store, action).await,
        Commands::Config { action } => cmd_config::run(store, action).await,
        Commands::Engines => {
            for e in engine::all() {
                let secondary = if e.secondary_action_locator.is_some() {
                    " (secondary action)"
                } else {
                    ""
                };
                println!("{:10} {}{}", e.name, e.origin, secondary);
            }
            Ok(())
        }
    }
}

fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("No platform data directory")?;
    Ok(base.join("pagerelay").join("pagerelay.db"))
}
