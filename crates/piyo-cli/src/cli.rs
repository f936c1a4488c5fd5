//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PiyoLog export inspector.
///
/// Reads export text produced by the PiyoLog baby-care app and prints
/// per-day summaries or the parsed document as JSON.
#[derive(Debug, Parser)]
#[command(name = "piyo", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// UTC offset for timestamps, e.g. +09:00.
    #[arg(long, global = true)]
    pub offset: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a per-day summary of an export.
    Summary {
        /// Export file; stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Emit the parsed document as JSON.
    Export {
        /// Export file; stdin when omitted.
        file: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
}
