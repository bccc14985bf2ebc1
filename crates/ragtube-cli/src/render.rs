//! Progressive terminal rendering of a streamed answer.

use std::io::{self, Write};

use ragtube_client::{RagtubeClient, SessionPhase};
use tracing::warn;

/// Submit `question` and echo the answer to stdout as it grows.
///
/// Ctrl-C cancels the session instead of killing the process.
pub async fn stream_answer(
    client: &RagtubeClient,
    question: &str,
) -> anyhow::Result<SessionPhase> {
    let mut rx = client.surface().subscribe();
    let handle = client.queries().submit(question)?;
    let generation = handle.generation();

    let mut stdout = std::io::stdout();
    let mut printed = 0usize;
    let mut listening = true;
    let done = handle.wait();
    tokio::pin!(done);

    let phase = loop {
        tokio::select! {
            phase = &mut done => break phase,
            changed = rx.changed() => {
                if changed.is_err() {
                    continue;
                }
                let answer = {
                    let view = rx.borrow_and_update();
                    if view.generation != generation {
                        continue;
                    }
                    view.answer[printed.min(view.answer.len())..].to_string()
                };
                printed += answer.len();
                write!(stdout, "{answer}")?;
                stdout.flush()?;
            }
            signal = tokio::signal::ctrl_c(), if listening => {
                listening = on_interrupt(client, signal);
            }
        }
    };

    // Anything published between the last change and the end of the task.
    let view = client.surface().snapshot();
    if view.generation == generation && view.answer.len() > printed {
        write!(stdout, "{}", &view.answer[printed..])?;
    }
    writeln!(stdout)?;

    if !view.error.is_empty() {
        eprintln!("error: {}", view.error);
    }
    if phase == SessionPhase::Cancelled {
        eprintln!("(cancelled)");
    }
    Ok(phase)
}

/// Cancel the live session on Ctrl-C. Returns false when the handler could
/// not be installed, after which the caller stops waiting for it.
fn on_interrupt(client: &RagtubeClient, signal: io::Result<()>) -> bool {
    match signal {
        Ok(()) => {
            client.queries().cancel_active();
            true
        }
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C");
            false
        }
    }
}
