pub mod config;
pub mod error;

pub use config::{ApiConfig, RagtubeConfig, StreamConfig};
pub use error::{RagtubeError, Result};
