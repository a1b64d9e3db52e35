//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// brewstream CLI
#[derive(Parser, Debug)]
#[command(name = "brewstream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all pages, filter the records, and print them as a JSON array
    Fetch {
        /// Minimum ABV a record must exceed (overrides the config file)
        #[arg(long)]
        min_abv: Option<f64>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
