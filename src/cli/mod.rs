//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// quotesync - manage a local quote collection and keep it in sync with a
/// remote service.
#[derive(Parser, Debug)]
#[command(name = "quotesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: plain, json, or table.
    #[arg(short, long, default_value = "plain")]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a random quote, optionally filtered by category.
    Show {
        /// Category to pick from ("all" for no filter). Remembered for
        /// the next run when given.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show again the quote last picked in this session.
    Last,

    /// Add a new quote to the collection.
    Add {
        /// The quote text.
        text: String,

        /// The quote category.
        category: String,
    },

    /// List stored quotes.
    List {
        /// Only list quotes in this category.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the categories currently in the collection.
    Categories,

    /// Export the collection as pretty-printed JSON.
    Export {
        /// Output file path (default: quotes.json).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import quotes from a JSON file, appending them to the collection.
    Import {
        /// File containing a JSON array of quotes.
        file: String,
    },

    /// Run one reconcile cycle against the remote service.
    Sync,

    /// Reconcile with the remote service on an interval until Ctrl-C.
    Watch {
        /// Seconds between cycles (default from config).
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show data and config paths being used.
    Paths,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
