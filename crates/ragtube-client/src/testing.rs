//! In-process transport for controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::error::ClientError;
use crate::ingest::IngestStatus;
use crate::transport::{QueryResponse, Transport};

pub(crate) type ChunkSender = mpsc::UnboundedSender<Result<Bytes, ClientError>>;

pub(crate) enum Reply {
    Stream(mpsc::UnboundedReceiver<Result<Bytes, ClientError>>),
    Status(u16),
    NoBody,
    Fail(ClientError),
}

/// Replays scripted replies in order. Query bodies are fed by the test
/// through the [`ChunkSender`] returned from [`FakeTransport::push_stream`].
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    ingests: Mutex<VecDeque<Result<IngestStatus, ClientError>>>,
    questions: Mutex<Vec<String>>,
    urls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_stream(&self) -> ChunkSender {
        let (tx, rx) = mpsc::unbounded_channel();
        self.replies.lock().unwrap().push_back(Reply::Stream(rx));
        tx
    }

    pub(crate) fn push_reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_ingest(&self, result: Result<IngestStatus, ClientError>) {
        self.ingests.lock().unwrap().push_back(result);
    }

    pub(crate) fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub(crate) fn ingested_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

pub(crate) fn chunk(text: &str) -> Result<Bytes, ClientError> {
    Ok(Bytes::copy_from_slice(text.as_bytes()))
}

#[async_trait]
impl Transport for FakeTransport {
    fn name(&self) -> &str {
        "fake"
    }

    async fn open_query(&self, question: &str) -> Result<QueryResponse, ClientError> {
        self.questions.lock().unwrap().push(question.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted query reply");
        match reply {
            Reply::Stream(rx) => Ok(QueryResponse {
                status: 200,
                body: Some(Box::pin(UnboundedReceiverStream::new(rx))),
            }),
            Reply::Status(status) => Ok(QueryResponse { status, body: None }),
            Reply::NoBody => Ok(QueryResponse {
                status: 200,
                body: None,
            }),
            Reply::Fail(e) => Err(e),
        }
    }

    async fn ingest(&self, video_url: &str) -> Result<IngestStatus, ClientError> {
        self.urls.lock().unwrap().push(video_url.to_string());
        self.ingests
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted ingest reply")
    }
}
