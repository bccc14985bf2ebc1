use thiserror::Error;

/// Shown for a query the backend refused or answered without a body.
pub const QUERY_FAILED_MESSAGE: &str = "Query failed. Check backend logs.";
/// Shown when an ingest failure carries no message of its own.
pub const INGEST_FAILED_MESSAGE: &str = "Failed to ingest video.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The query endpoint answered with a non-success status.
    #[error("Backend returned status {status}")]
    Status { status: u16 },

    #[error("Response has no readable body")]
    MissingBody,

    /// The body stream failed after streaming began.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The ingest endpoint answered with a non-success status and no
    /// in-band status object.
    #[error("{message} (status {status})")]
    Rejected { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },
}

impl ClientError {
    /// Text written into the user-visible error slot.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { .. } | ClientError::MissingBody => {
                QUERY_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
