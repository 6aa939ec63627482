//! Command-line interface definitions

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_ENDPOINT, EVAL_SESSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lookup BTE exam copy marks by barcode
#[derive(Parser, Debug)]
#[command(name = "copymarks", version, about)]
pub struct Cli {
    /// Marks endpoint URL
    #[arg(long, global = true, env = "COPYMARKS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Evaluation session label sent with every request
    #[arg(long, global = true, default_value = EVAL_SESSION)]
    pub session: String,

    /// Maximum concurrent requests
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Lookup modes
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single barcode
    Lookup {
        /// The barcode / copy number to look up
        bar_code: String,
    },
    /// Look up many barcodes, one per input line
    Batch {
        /// File with one barcode per line; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,

        /// Resolve barcodes one at a time instead of concurrently
        #[arg(long)]
        sequential: bool,
    },
}
