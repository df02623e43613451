//! JSON and JSONL decoders

use super::types::{DecoderFormat, RecordDecoder};
use crate::error::{Error, Result};
use serde_json::Value;

/// Decodes one JSON document
///
/// Without a record path a top-level array yields its elements and any other
/// value yields a single record. With a path, the selected value is treated
/// the same way.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Decoder for a document whose records are at the top level
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder selecting records at `path` (`$.data.items`, `data[0]`, `items[-1]`)
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("invalid JSON: {e}")))?;

        let Some(path) = self.record_path.as_deref() else {
            return Ok(into_records(document));
        };
        let selected = select(&document, path).ok_or_else(|| Error::RecordExtraction {
            path: path.to_string(),
            message: "path not found in document".to_string(),
        })?;
        Ok(into_records(selected.clone()))
    }
}

/// Decodes JSON Lines; blank lines are skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        body.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line)
                    .map_err(|e| Error::decode(format!("invalid JSON on line {}: {e}", index + 1)))
            })
            .collect()
    }
}

/// Build a decoder for `format`; `record_path` only applies to JSON
pub fn decoder_for(format: DecoderFormat, record_path: Option<&str>) -> Box<dyn RecordDecoder> {
    match format {
        DecoderFormat::Json => Box::new(JsonDecoder {
            record_path: record_path.map(str::to_string),
        }),
        DecoderFormat::Jsonl => Box::new(JsonlDecoder),
    }
}

fn into_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Walk a dot path; `[n]` indexes an array (negative from the end), `[*]`
/// keeps the whole array
fn select<'v>(document: &'v Value, path: &str) -> Option<&'v Value> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let mut current = document;

    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        let (key, index) = match segment.split_once('[') {
            Some((key, rest)) => (key, Some(rest.strip_suffix(']')?)),
            None => (segment, None),
        };
        if !key.is_empty() {
            current = current.get(key)?;
        }
        match index {
            None | Some("*") => {}
            Some(index) => current = element(current.as_array()?, index.parse().ok()?)?,
        }
    }

    Some(current)
}

fn element(items: &[Value], index: i64) -> Option<&Value> {
    let position = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        items.len().checked_sub(back)?
    } else {
        usize::try_from(index).ok()?
    };
    items.get(position)
}
