use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagtubeError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RagtubeError {
    /// Short, stable error code for logs and exit reporting.
    pub fn code(&self) -> &'static str {
        match self {
            RagtubeError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, RagtubeError>;
