//! CLI commands and argument parsing

use crate::decode::DecoderFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Pager CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML) with run limits
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through a file and print every item (or page) as a JSON line
    Walk {
        /// Input and paging options
        #[command(flatten)]
        source: SourceArgs,

        /// Print one line per page instead of one per item
        #[arg(long)]
        batch: bool,
    },

    /// Page through a file and print page and item counts
    Count {
        /// Input and paging options
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where the records come from and how they are paged
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Input file (JSON or JSONL)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Input format (default: guessed from the file extension)
    #[arg(short, long)]
    pub format: Option<DecoderFormat>,

    /// Dot path to the record array inside a JSON document
    #[arg(long)]
    pub record_path: Option<String>,

    /// Records per page
    #[arg(long, default_value = "100")]
    pub page_size: u64,

    /// Stop after this many pages (overrides the settings file)
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// Fail if the run takes longer than this (overrides the settings file)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}
