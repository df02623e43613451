//! CLI module
//!
//! Command-line interface for paging through local record files.
//!
//! # Commands
//!
//! - `walk` - Print every item (or every page with `--batch`) as JSON lines
//! - `count` - Print how many pages and items a run visits

mod commands;
mod runner;

pub use commands::{Cli, Commands, SourceArgs};
pub use runner::{build_iterator, RecordIterator, Runner};
