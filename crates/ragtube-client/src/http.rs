//! reqwest-backed [`Transport`] for the RagTube HTTP API.
//!
//! - `GET {base}/query?question=…` streams NDJSON answer records
//! - `GET {base}/ingest?video_url=…` returns one JSON status object

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use ragtube_core::config::{ApiConfig, NDJSON_CONTENT_TYPE};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, INGEST_FAILED_MESSAGE};
use crate::ingest::IngestStatus;
use crate::transport::{QueryResponse, Transport};

pub struct HttpTransport {
    client: reqwest::Client,
    api: ApiConfig,
}

impl HttpTransport {
    pub fn new(api: ApiConfig) -> Result<Self, ClientError> {
        // Connect timeout only: a streamed answer may legitimately take
        // arbitrarily long.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .build()?;
        Ok(Self { client, api })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn open_query(&self, question: &str) -> Result<QueryResponse, ClientError> {
        let url = self.api.query_url();
        debug!(url = %url, "opening answer stream");

        let resp = self
            .client
            .get(&url)
            .query(&[("question", question)])
            .header(ACCEPT, NDJSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "query request failed");
                ClientError::Http(e)
            })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            warn!(status, "query endpoint returned error status");
            return Ok(QueryResponse { status, body: None });
        }

        let body = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ClientError::Transport(e.to_string())));
        Ok(QueryResponse {
            status,
            body: Some(Box::pin(body)),
        })
    }

    async fn ingest(&self, video_url: &str) -> Result<IngestStatus, ClientError> {
        let url = self.api.ingest_url();
        debug!(url = %url, video_url, "sending ingest request");

        let resp = self
            .client
            .get(&url)
            .query(&[("video_url", video_url)])
            .timeout(Duration::from_secs(self.api.ingest_timeout_secs))
            .send()
            .await?;

        // The backend reports ingest failures in-band, so the body is
        // decoded whatever the status.
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "ingest endpoint returned error status");
        }

        let reply: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::Parse(format!("invalid ingest response ({status}): {e}")))?;
        if !status.is_success() && reply.get("status").is_none() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&reply),
            });
        }
        serde_json::from_value(reply)
            .map_err(|e| ClientError::Parse(format!("invalid ingest response ({status}): {e}")))
    }
}

/// Best human-readable text in an error body without a status field.
fn rejection_message(reply: &Value) -> String {
    ["transcript", "error", "detail"]
        .iter()
        .filter_map(|key| reply.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or(INGEST_FAILED_MESSAGE)
        .to_string()
}
