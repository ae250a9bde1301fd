//! Command-line interface built on clap.

mod commands;

use clap::{Parser, Subcommand};

/// Anidex - anime metadata lookup
/// Serves the catalogue over HTTP and answers chat commands
#[derive(Parser)]
#[command(name = "anidex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the REST API
    #[command(alias = "daemon")]
    Serve,

    /// Connect the chat bot to Discord
    Bot {
        /// Read commands from stdin and print replies instead of connecting
        #[arg(long)]
        console: bool,
    },

    /// Look up an anime by id or title and print the requested fields
    #[command(alias = "g")]
    Get {
        /// Numeric id or title (quote titles with spaces)
        identifier: String,
        /// Fields to print (default: episodes, `all` for every field)
        fields: Vec<String>,
    },

    /// Insert an anime record
    #[command(alias = "a")]
    Add(AddArgs),

    /// List requestable field names
    Fields,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(clap::Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long = "media-type")]
    pub media_type: Option<String>,

    #[arg(long)]
    pub episodes: Option<i32>,

    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub ongoing: Option<String>,

    #[arg(long = "start-year")]
    pub start_year: Option<String>,

    #[arg(long = "finish-year")]
    pub finish_year: Option<String>,

    /// Season of release, e.g. "Spring 2013"
    #[arg(long)]
    pub season: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub studios: Option<String>,

    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long = "content-warning")]
    pub content_warning: Option<String>,

    /// Number of users who finished the show
    #[arg(long)]
    pub watched: Option<i32>,

    #[arg(long)]
    pub watching: Option<i32>,

    #[arg(long = "want-to-watch")]
    pub want_to_watch: Option<i32>,

    #[arg(long)]
    pub dropped: Option<i32>,

    #[arg(long)]
    pub rating: Option<String>,

    #[arg(long)]
    pub votes: Option<i32>,
}

pub use commands::*;
