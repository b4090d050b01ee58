//! CLI module for triad
//!
//! Provides command-line interface parsing for the triad-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use crate::types::Capability;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Triad - research, documentation and coding agents behind one router
#[derive(Parser, Debug)]
#[command(
    name = "triad-server",
    version,
    about = "Triad - multi-agent request router and pipeline server",
    long_about = "Routes free-text requests to research, documentation and coding agents,\n\
                  runs them in a fixed pipeline and keeps a conversation history.\n\n\
                  Run without arguments to start the HTTP server.",
    after_help = "EXAMPLES:\n    \
                  triad-server                                  # Start the server (reads triad.toml)\n    \
                  triad-server ask \"research rust async\"        # Process one request\n    \
                  triad-server ask \"fix code\" --agents coding   # Force the capability list\n    \
                  triad-server route \"debug my algorithm\"       # Show the routing decision\n    \
                  triad-server config --validate                # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "triad.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Process a single request and print the results
    Ask {
        /// The request text
        message: String,

        /// Comma-separated capabilities to run instead of routing
        #[arg(short, long, value_delimiter = ',')]
        agents: Vec<Capability>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show which capabilities a request routes to, without running anything
    Route {
        /// The request text
        message: String,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
