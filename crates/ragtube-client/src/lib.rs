//! ragtube-client: streaming question answering against a RagTube backend.
//!
//! A [`QueryController`] runs one streamed answer at a time and an
//! [`IngestController`] loads videos; both report into a shared [`Surface`].
//!
//! ```rust,no_run
//! use ragtube_client::RagtubeClient;
//! use ragtube_core::RagtubeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ragtube_client::ClientError> {
//!     let client = RagtubeClient::from_config(&RagtubeConfig::default())?;
//!     client.ingest().run("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     let phase = client.queries().ask("What is the main takeaway?").await?;
//!     println!("{phase:?}: {}", client.surface().snapshot().answer);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod history;
pub mod http;
pub mod ingest;
pub mod session;
pub mod surface;
pub mod transport;
pub mod video;

#[cfg(test)]
mod testing;

pub use client::RagtubeClient;
pub use error::{ClientError, Result};
pub use history::{Exchange, History};
pub use http::HttpTransport;
pub use ingest::{IngestController, IngestStatus};
pub use session::{QueryController, SessionHandle};
pub use surface::{SessionPhase, Surface, View};
pub use transport::{ByteStream, QueryResponse, Transport};
