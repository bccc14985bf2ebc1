//! Applying decoded records to per-session answer state.

use crate::record::StreamRecord;

/// State of one query session as seen by observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub busy: bool,
    /// Concatenation of every `text` fragment, in arrival order.
    pub answer: String,
    /// Last error reported during the session. Empty when none.
    pub error: String,
}

impl SessionState {
    /// Fresh state for a newly submitted query.
    pub fn begin() -> Self {
        Self {
            busy: true,
            ..Self::default()
        }
    }
}

/// Whether the reader should keep pulling chunks after a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Apply one record. Effects run in the order error, text, done.
///
/// An error record overwrites the previous error and does not stop the
/// stream. Only `done` returns [`Flow::Stop`]; clearing `busy` is the
/// session controller's job.
pub fn apply(record: &StreamRecord, state: &mut SessionState) -> Flow {
    if let Some(error) = &record.error {
        state.error.clone_from(error);
    }
    if let Some(text) = &record.text {
        state.answer.push_str(text);
    }
    if record.done {
        Flow::Stop
    } else {
        Flow::Continue
    }
}
