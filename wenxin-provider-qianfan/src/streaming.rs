//! Line-oriented response aggregation for the Qianfan chat API.
//!
//! The service answers with one JSON object per line, each optionally framed
//! with a `data:` marker, and blank separator lines in between:
//! ```text
//! data:{"id":"as-1","result":"Hel","is_end":false}
//!
//! data:{"id":"as-1","result":"lo","is_end":true}
//! ```
//!
//! Each non-blank line becomes a [`GenerationChunk`]; chunks are folded left
//! to right into one final chunk per prompt.

use serde::de::Error as _;
use serde_json::Value;
use wenxin_types::{AggregateError, GenerationChunk};

use crate::types::StreamLine;

/// Framing marker that may precede a line's JSON object.
const DATA_PREFIX: &str = "data:";

/// Decode one non-blank response line into a chunk.
///
/// A leading `data:` marker is stripped. A missing or `null` `result` yields
/// an empty-text chunk. A non-string `result`, or a line that is not a JSON
/// object (an array, string, number, `null`), is an error.
pub fn stream_line_to_chunk(line: &str) -> Result<GenerationChunk, AggregateError> {
    let trimmed = line.trim_start();
    let payload = trimmed.strip_prefix(DATA_PREFIX).unwrap_or(trimmed);
    let parse_error = |source: serde_json::Error| AggregateError::Parse {
        line: line.to_owned(),
        source,
    };

    // A derived struct decoder also accepts a JSON array, so check the shape first.
    let value: Value = serde_json::from_str(payload).map_err(parse_error)?;
    if !value.is_object() {
        return Err(parse_error(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        ))));
    }
    let parsed: StreamLine = serde_json::from_value(value).map_err(parse_error)?;

    Ok(GenerationChunk::new(parsed.result.unwrap_or_default()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Running fold over the lines of one response.
#[derive(Debug, Default)]
pub struct ChunkAggregator {
    /// Fold so far. `None` until the first usable line arrives.
    current: Option<GenerationChunk>,
}

impl ChunkAggregator {
    /// An empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one line. Blank and whitespace-only lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Parse`] for a malformed line. The aggregator
    /// is left as it was before the call.
    pub fn push_line(&mut self, line: &str) -> Result<(), AggregateError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let chunk = stream_line_to_chunk(line)?;
        self.current = Some(match self.current.take() {
            Some(acc) => acc + chunk,
            None => chunk,
        });
        Ok(())
    }

    /// Finish the fold.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyGeneration`] when no line was folded.
    pub fn finish(self) -> Result<GenerationChunk, AggregateError> {
        self.current.ok_or(AggregateError::EmptyGeneration)
    }
}

/// Fold a whole raw response into one chunk.
///
/// Lines are split on `\n` or `\r\n`; a trailing newline does not produce an
/// extra line. The first malformed line aborts the fold.
pub fn aggregate(raw: &str) -> Result<GenerationChunk, AggregateError> {
    let mut aggregator = ChunkAggregator::new();
    for line in raw.lines() {
        aggregator.push_line(line)?;
    }
    aggregator.finish()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
