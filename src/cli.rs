//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PageRelay CLI.
#[derive(Parser)]
#[command(name = "pagerelay")]
#[command(about = "Relay page text into AI chat front-ends, track visit durations")]
#[command(version)]
pub struct Cli {
    /// Chrome remote debugging endpoint
    #[arg(
        long,
        default_value = "http://127.0.0.1:9222",
        global = true,
        env = "PAGERELAY_CDP"
    )]
    pub cdp: String,

    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture text, stage it, and auto-submit it into an engine page
    Send {
        /// Engine to use (gemini, qwen, deepseek, aistudio); defaults to the
        /// configured favorite
        #[arg(long)]
        engine: Option<String>,

        /// Literal payload text
        #[arg(long, conflicts_with = "from_url")]
        text: Option<String>,

        /// Capture the visible text of an open page with this URL
        #[arg(long)]
        from_url: Option<String>,

        /// Send the payload verbatim, without the template prefix
        #[arg(long)]
        raw: bool,
    },

    /// Follow a page and record its visit duration
    Track {
        /// URL of the page to follow
        #[arg(long)]
        url: String,
    },

    /// Browse the visit log
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Read or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List supported engines
    Engines,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recent visits, grouped by day
    List {
        #[arg(long)]
        limit: Option<usize>,

        /// Only today's visits
        #[arg(long)]
        today: bool,

        /// Only the last seven days
        #[arg(long)]
        week: bool,

        /// Only visits on this date (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,

        /// Only visits starting in this local hour (0-23)
        #[arg(long)]
        hour: Option<u32>,

        /// Only visits at least this long, in seconds
        #[arg(long)]
        min_duration: Option<i64>,
    },

    /// Search title, url, domain, and content
    Search { query: String },

    /// Days of a month with recorded visits
    Calendar {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },

    /// Visit counts by hour of day
    Hours,

    /// Totals over the whole log
    Stats,

    /// Delete one record by id
    Delete { id: i64 },

    /// Delete all records
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Get,

    /// Update one or more settings
    Set {
        #[arg(long)]
        template_prefix: Option<String>,

        #[arg(long)]
        secondary_action_enabled: Option<bool>,

        #[arg(long)]
        tracking_enabled: Option<bool>,

        #[arg(long)]
        favorite_engine: Option<String>,
    },
}
