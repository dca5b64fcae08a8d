use clap::{Parser, Subcommand};

use crate::services::sync_service::DEFAULT_MAX_ENTRIES;

#[derive(Parser)]
#[command(name = "notion-feeder")]
#[command(about = "Mirrors new RSS/Atom feed items into a Notion database")]
#[command(version)]
pub struct Cli {
    /// Feed list file (TOML or JSON)
    #[arg(long, global = true, env = "FEEDER_FEEDS_PATH")]
    pub feeds: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all configured feeds and write new entries to Notion
    Run {
        /// Dry run - read Notion and the feeds but don't create any records
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of entries considered per feed
        #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
        limit: usize,
    },

    /// List the configured feeds
    List,
}
