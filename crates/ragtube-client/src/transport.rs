use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;

use crate::error::ClientError;
use crate::ingest::IngestStatus;

/// Response body as an ordered sequence of opaque chunks.
///
/// Chunk boundaries carry no meaning. Dropping the stream stops delivery.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ClientError>> + Send>>;

/// Answer to a query request, before any of the body is read.
pub struct QueryResponse {
    pub status: u16,
    /// `None` when the backend sent nothing readable.
    pub body: Option<ByteStream>,
}

impl QueryResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for QueryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResponse")
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// The backend as seen by the controllers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    /// Ask a question and return the status plus the streamed NDJSON body.
    ///
    /// A non-success status is a normal return, not an `Err`; errors are for
    /// requests that never produced a response.
    async fn open_query(&self, question: &str) -> Result<QueryResponse, ClientError>;

    /// Ingest a video and return the backend's one-shot status object.
    async fn ingest(&self, video_url: &str) -> Result<IngestStatus, ClientError>;
}
