//! Video ingestion: one request, one JSON status object.
//!
//! Backend replies look like:
//! ```text
//! {"video_url":"…","status":"ingested","chunks":42}
//! {"video_url":"…","status":"failed","transcript":"No transcript available"}
//! {"video_url":"…","status":"error","error":"faiss index write failed"}
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ClientError, INGEST_FAILED_MESSAGE};
use crate::surface::Surface;
use crate::transport::Transport;

pub const STATUS_INGESTED: &str = "ingested";

/// Status object returned by the ingest endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<u64>,
    /// On failure the backend puts its explanation here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestStatus {
    pub fn is_ingested(&self) -> bool {
        self.status.as_deref() == Some(STATUS_INGESTED)
    }

    /// Upper-cased status, or `INFO` when the backend sent none.
    pub fn label(&self) -> String {
        match self.status.as_deref() {
            Some(s) if !s.is_empty() => s.to_uppercase(),
            _ => "INFO".to_string(),
        }
    }

    /// One-line human summary: transcript text, else error, else chunk count.
    pub fn summary(&self) -> String {
        non_empty(&self.transcript)
            .or_else(|| non_empty(&self.error))
            .map(String::from)
            .unwrap_or_else(|| format!("Stored {} chunks.", self.chunks.unwrap_or(0)))
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Runs ingest requests and reports them on the shared surface.
///
/// Has its own busy flag; never waits on, or is waited on by, a query.
#[derive(Clone)]
pub struct IngestController {
    transport: Arc<dyn Transport>,
    surface: Surface,
}

impl IngestController {
    pub fn new(transport: Arc<dyn Transport>, surface: Surface) -> Self {
        Self { transport, surface }
    }

    pub async fn run(&self, video_url: &str) -> Result<IngestStatus, ClientError> {
        let video_url = video_url.trim();
        if video_url.is_empty() {
            return Err(ClientError::EmptyInput { field: "video_url" });
        }

        self.surface.begin_ingest();
        info!(transport = self.transport.name(), video_url, "ingest started");

        match self.transport.ingest(video_url).await {
            Ok(status) => {
                info!(
                    status = status.status.as_deref().unwrap_or("unknown"),
                    chunks = status.chunks.unwrap_or(0),
                    "ingest finished"
                );
                self.surface.finish_ingest(Some(status.clone()), None);
                Ok(status)
            }
            Err(e) => {
                warn!(error = %e, "ingest failed");
                let mut message = e.to_string();
                if message.is_empty() {
                    message = INGEST_FAILED_MESSAGE.to_string();
                }
                self.surface.finish_ingest(None, Some(message));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::View;
    use crate::testing::FakeTransport;

    fn status_json(json: &str) -> IngestStatus {
        serde_json::from_str(json).expect("valid status json")
    }

    #[test]
    fn parses_success_reply() {
        let status = status_json(r#"{"video_url":"u","status":"ingested","chunks":42}"#);
        assert!(status.is_ingested());
        assert_eq!(status.chunks, Some(42));
        assert_eq!(status.label(), "INGESTED");
        assert_eq!(status.summary(), "Stored 42 chunks.");
    }

    #[test]
    fn failed_reply_summarises_transcript() {
        let status = status_json(r#"{"status":"failed","transcript":"No transcript available"}"#);
        assert!(!status.is_ingested());
        assert_eq!(status.label(), "FAILED");
        assert_eq!(status.summary(), "No transcript available");
    }

    #[test]
    fn error_reply_summarises_error() {
        let status = status_json(r#"{"status":"error","error":"disk full"}"#);
        assert_eq!(status.summary(), "disk full");
    }

    #[test]
    fn bare_object_defaults() {
        let status = status_json("{}");
        assert_eq!(status.label(), "INFO");
        assert_eq!(status.summary(), "Stored 0 chunks.");
    }

    #[tokio::test]
    async fn success_is_published() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_ingest(Ok(status_json(r#"{"status":"ingested","chunks":7}"#)));
        let surface = Surface::new();
        let ingest = IngestController::new(fake.clone(), surface.clone());

        let status = ingest.run("  https://youtu.be/abc  ").await.expect("ingest ok");
        assert_eq!(status.chunks, Some(7));
        assert_eq!(fake.ingested_urls(), vec!["https://youtu.be/abc".to_string()]);

        let view = surface.snapshot();
        assert!(!view.ingest_busy);
        assert_eq!(view.ingest, Some(status));
        assert_eq!(view.error, "");
    }

    #[tokio::test]
    async fn failure_writes_error_slot() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_ingest(Err(ClientError::Parse("not json".to_string())));
        let surface = Surface::new();
        let ingest = IngestController::new(fake, surface.clone());

        assert!(ingest.run("https://youtu.be/abc").await.is_err());
        let view = surface.snapshot();
        assert!(!view.ingest_busy);
        assert_eq!(view.ingest, None);
        assert_eq!(view.error, "Parse error: not json");
    }

    #[tokio::test]
    async fn empty_url_is_rejected_without_side_effects() {
        let fake = Arc::new(FakeTransport::new());
        let surface = Surface::new();
        let ingest = IngestController::new(fake.clone(), surface.clone());

        let err = ingest.run("   ").await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyInput { field: "video_url" }));
        assert!(fake.ingested_urls().is_empty());
        assert_eq!(surface.snapshot(), View::default());
    }
}
