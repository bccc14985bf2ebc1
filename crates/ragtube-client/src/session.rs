//! Streamed query sessions.
//!
//! Each submitted question gets its own task, line framer and
//! [`SessionState`]. Submitting again cancels the previous session and
//! bumps the surface generation, so late chunks from the old stream can
//! never land in the new answer.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::StreamExt;
use ragtube_core::StreamConfig;
use ragtube_stream::{apply, decode, Flow, LineFramer, SessionState};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::surface::{SessionPhase, Surface};
use crate::transport::Transport;

/// Starts query sessions and keeps at most one of them live.
pub struct QueryController {
    transport: Arc<dyn Transport>,
    surface: Surface,
    config: StreamConfig,
    active: Mutex<Option<CancellationToken>>,
}

impl QueryController {
    pub fn new(transport: Arc<dyn Transport>, surface: Surface, config: StreamConfig) -> Self {
        Self {
            transport,
            surface,
            config,
            active: Mutex::new(None),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Start streaming an answer to `question`.
    ///
    /// Any session still running is cancelled first. Must be called from
    /// within a tokio runtime.
    pub fn submit(&self, question: &str) -> Result<SessionHandle, ClientError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ClientError::EmptyInput { field: "question" });
        }

        // Bump the generation before cancelling so the old session's
        // remaining writes are already stale.
        let generation = self.surface.begin_query();
        let cancel = CancellationToken::new();
        let previous = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(cancel.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let session = Session {
            generation,
            question: question.to_string(),
            transport: Arc::clone(&self.transport),
            surface: self.surface.clone(),
            flush_trailing_line: self.config.flush_trailing_line,
            cancel: cancel.clone(),
        };
        let task = tokio::spawn(session.run());

        Ok(SessionHandle {
            generation,
            cancel,
            task,
        })
    }

    /// Submit and wait for the session to end.
    pub async fn ask(&self, question: &str) -> Result<SessionPhase, ClientError> {
        Ok(self.submit(question)?.wait().await)
    }

    /// Cancel the live session, if any.
    pub fn cancel_active(&self) {
        if let Some(token) = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}

/// Handle to one running session.
#[derive(Debug)]
pub struct SessionHandle {
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<SessionPhase>,
}

impl SessionHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask the session to stop pulling chunks. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the session to end and return how it ended.
    pub async fn wait(self) -> SessionPhase {
        match self.task.await {
            Ok(phase) => phase,
            Err(e) => {
                warn!(generation = self.generation, error = %e, "query session task aborted");
                SessionPhase::Failed
            }
        }
    }
}

struct Session {
    generation: u64,
    question: String,
    transport: Arc<dyn Transport>,
    surface: Surface,
    flush_trailing_line: bool,
    cancel: CancellationToken,
}

impl Session {
    async fn run(self) -> SessionPhase {
        info!(
            generation = self.generation,
            transport = self.transport.name(),
            "query session started"
        );
        let mut state = SessionState::begin();

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return self.finish(&mut state, SessionPhase::Cancelled),
            response = self.transport.open_query(&self.question) => response,
        };

        let mut body = match response {
            Ok(resp) if resp.is_success() => match resp.body {
                Some(body) => body,
                None => return self.fail(&mut state, ClientError::MissingBody),
            },
            Ok(resp) => return self.fail(&mut state, ClientError::Status { status: resp.status }),
            Err(e) => return self.fail(&mut state, e),
        };

        self.surface
            .publish_query(self.generation, SessionPhase::Streaming, &state, false);

        let mut framer = LineFramer::new();
        loop {
            // Dropping `body` on any return below closes the response.
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(generation = self.generation, "cancelled; dropping partial line");
                    return self.finish(&mut state, SessionPhase::Cancelled);
                }
                next = body.next() => next,
            };

            match next {
                Some(Ok(chunk)) => {
                    debug!(generation = self.generation, bytes = chunk.len(), "chunk received");
                    for line in framer.feed(&chunk) {
                        if self.dispatch(&line, &mut state) == Flow::Stop {
                            debug!(generation = self.generation, "done record; closing stream");
                            drop(body);
                            return self.finish(&mut state, SessionPhase::Completed);
                        }
                        if self.cancel.is_cancelled() {
                            return self.finish(&mut state, SessionPhase::Cancelled);
                        }
                    }
                }
                Some(Err(e)) => return self.fail(&mut state, e),
                None => {
                    if self.flush_trailing_line {
                        if let Some(line) = framer.finish() {
                            debug!(generation = self.generation, "flushing final line");
                            self.dispatch(&line, &mut state);
                        }
                    } else if !framer.pending().is_empty() {
                        debug!(
                            generation = self.generation,
                            bytes = framer.pending().len(),
                            "discarding unterminated final line"
                        );
                    }
                    return self.finish(&mut state, SessionPhase::Completed);
                }
            }
        }
    }

    /// Decode and apply one line, publishing the result.
    fn dispatch(&self, line: &str, state: &mut SessionState) -> Flow {
        let Some(record) = decode(line) else {
            return Flow::Continue;
        };
        if let Some(error) = &record.error {
            warn!(generation = self.generation, error = %error, "backend reported error");
        }
        let flow = apply(&record, state);
        if flow == Flow::Continue && !record.is_empty() {
            self.surface.publish_query(
                self.generation,
                SessionPhase::Streaming,
                state,
                record.error.is_some(),
            );
        } else if flow == Flow::Stop && record.error.is_some() {
            // `finish` does not rewrite the error slot.
            self.surface.publish_query(self.generation, SessionPhase::Streaming, state, true);
        }
        flow
    }

    fn fail(&self, state: &mut SessionState, err: ClientError) -> SessionPhase {
        warn!(generation = self.generation, error = %err, "query session failed");
        state.error = err.user_message();
        state.busy = false;
        self.surface
            .publish_query(self.generation, SessionPhase::Failed, state, true);
        SessionPhase::Failed
    }

    fn finish(&self, state: &mut SessionState, phase: SessionPhase) -> SessionPhase {
        state.busy = false;
        let current = self.surface.publish_query(self.generation, phase, state, false);
        info!(
            generation = self.generation,
            phase = ?phase,
            answer_len = state.answer.len(),
            superseded = !current,
            "query session finished"
        );
        phase
    }
}
