//! Decoding of one NDJSON line into a [`StreamRecord`].
//!
//! Wire shape, one object per line, every field optional:
//! ```text
//! {"text":"Hel"}
//! {"text":"lo"}
//! {"error":"vector store is empty"}
//! {"done":true}
//! ```

use serde_json::Value;
use tracing::debug;

/// One decoded line of the answer stream.
///
/// Fields are independent: a record can carry text and `done` together.
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamRecord {
    /// Answer fragment to append.
    pub text: Option<String>,
    /// Message from the producer. Reported, not terminal.
    pub error: Option<String>,
    /// Explicit end of answer.
    pub done: bool,
}

impl StreamRecord {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn done() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }

    /// True when the record has no effect on session state.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.error.is_none() && !self.done
    }
}

/// Decode a single line. Blank and malformed lines yield `None`.
///
/// A bad line never fails the stream; it is logged at debug level and
/// skipped. Unknown fields and fields of the wrong type are ignored.
pub fn decode(line: &str) -> Option<StreamRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let json: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            debug!(err = %e, len = line.len(), "skipping malformed stream line");
            return None;
        }
    };

    let Value::Object(fields) = json else {
        debug!("skipping non-object stream line");
        return None;
    };

    Some(StreamRecord {
        text: non_empty_str(fields.get("text")),
        error: non_empty_str(fields.get("error")),
        done: fields.get("done").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
