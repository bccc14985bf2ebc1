//! Observable state shared by the query and ingest controllers.
//!
//! Published through a `tokio::sync::watch` channel so any number of
//! observers (terminal renderer, logger, tests) can read the latest
//! [`View`] or wait for changes.

use std::sync::Arc;

use ragtube_stream::SessionState;
use tokio::sync::watch;

use crate::ingest::IngestStatus;

/// Lifecycle of one query session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionPhase::Completed | SessionPhase::Failed | SessionPhase::Cancelled
        )
    }
}

/// Everything a front-end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Generation of the current query session. Writes from older
    /// generations are discarded.
    pub generation: u64,
    pub phase: SessionPhase,
    pub query_busy: bool,
    pub answer: String,
    pub ingest_busy: bool,
    pub ingest: Option<IngestStatus>,
    /// User-visible error slot, written by both controllers.
    pub error: String,
}

#[derive(Clone)]
pub struct Surface {
    tx: Arc<watch::Sender<View>>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(View::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> View {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.tx.subscribe()
    }

    /// Start a new query generation: clears answer and error, marks busy.
    pub(crate) fn begin_query(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|view| {
            view.generation += 1;
            generation = view.generation;
            view.phase = SessionPhase::Requesting;
            view.query_busy = true;
            view.answer.clear();
            view.error.clear();
        });
        generation
    }

    /// Mirror a session's state into the view if `generation` is current.
    ///
    /// The shared error slot is only written when `error_changed`, so an
    /// ingest error raised mid-stream is not blanked by the next fragment.
    /// Returns false when the write was discarded as stale.
    pub(crate) fn publish_query(
        &self,
        generation: u64,
        phase: SessionPhase,
        state: &SessionState,
        error_changed: bool,
    ) -> bool {
        self.tx.send_if_modified(|view| {
            if view.generation != generation {
                return false;
            }
            view.phase = phase;
            view.query_busy = state.busy;
            view.answer.clone_from(&state.answer);
            if error_changed {
                view.error.clone_from(&state.error);
            }
            true
        })
    }

    pub(crate) fn begin_ingest(&self) {
        self.tx.send_modify(|view| {
            view.ingest_busy = true;
            view.ingest = None;
            view.error.clear();
        });
    }

    pub(crate) fn finish_ingest(&self, status: Option<IngestStatus>, error: Option<String>) {
        self.tx.send_modify(|view| {
            view.ingest_busy = false;
            view.ingest = status;
            if let Some(error) = error {
                view.error = error;
            }
        });
    }
}
