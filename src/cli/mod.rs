pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A category-aware news feed aggregator", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/gazette/config.toml
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the newest items, optionally for one category
    Items {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show trending items
    Trending {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show items from every source
    All {
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Search titles, content and tags
    Search {
        query: String,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// List categories of enabled sources
    Categories,
    /// List enabled sources
    Sources,
    /// Fetch every source and report how each one did
    Report {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Keep refreshing and print items as they appear
    Watch {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Refresh interval (e.g., "30s", "5m", "1h")
        #[arg(short, long)]
        interval: Option<String>,

        /// Bypass the result cache on every refresh
        #[arg(long)]
        force: bool,
    },
}
