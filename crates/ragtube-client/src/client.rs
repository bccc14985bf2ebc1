use std::sync::Arc;

use ragtube_core::RagtubeConfig;

use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::ingest::IngestController;
use crate::session::QueryController;
use crate::surface::Surface;
use crate::transport::Transport;

/// Both controllers wired to one transport and one surface.
pub struct RagtubeClient {
    surface: Surface,
    queries: QueryController,
    ingest: IngestController,
}

impl RagtubeClient {
    /// Build an HTTP-backed client from explicit configuration.
    pub fn from_config(config: &RagtubeConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.api.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn new(transport: Arc<dyn Transport>, config: &RagtubeConfig) -> Self {
        let surface = Surface::new();
        Self {
            queries: QueryController::new(
                Arc::clone(&transport),
                surface.clone(),
                config.stream.clone(),
            ),
            ingest: IngestController::new(transport, surface.clone()),
            surface,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn queries(&self) -> &QueryController {
        &self.queries
    }

    pub fn ingest(&self) -> &IngestController {
        &self.ingest
    }
}
