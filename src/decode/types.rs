//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Format of the input document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// JSON Lines format (one JSON value per line)
    Jsonl,
}

impl DecoderFormat {
    /// Guess the format from a file extension; anything unknown is JSON
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jsonl" | "ndjson") => Self::Jsonl,
            _ => Self::Json,
        }
    }
}

/// Trait for decoding a document into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the document into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
