//! Input decoder module
//!
//! Supports: JSON, JSONL
//!
//! # Overview
//!
//! Turns a local document into the records the CLI pages through. JSON
//! documents can point at a nested array with a dot path.

mod decoders;
mod types;

pub use decoders::{decoder_for, JsonDecoder, JsonlDecoder};
pub use types::{DecoderFormat, RecordDecoder};
