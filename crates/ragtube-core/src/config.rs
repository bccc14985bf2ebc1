use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INGEST_TIMEOUT_SECS: u64 = 300;
/// Content type the query endpoint streams back.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Top-level config (ragtube.toml + RAGTUBE_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RagtubeConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

/// Where the backend lives and how long we are willing to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bound on establishing a connection. The query stream itself is never
    /// timed out once it is flowing.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Bound on the whole one-shot ingest request (transcript fetch plus
    /// embedding can take minutes on the backend).
    #[serde(default = "default_ingest_timeout")]
    pub ingest_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            ingest_timeout_secs: DEFAULT_INGEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    pub fn ingest_url(&self) -> String {
        format!("{}/ingest", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamConfig {
    /// Emit a trailing unterminated line when the body ends naturally.
    /// Cancelled or completed (`done`) sessions always drop it.
    #[serde(default = "bool_true")]
    pub flush_trailing_line: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            flush_trailing_line: true,
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}
fn default_ingest_timeout() -> u64 {
    DEFAULT_INGEST_TIMEOUT_SECS
}

impl RagtubeConfig {
    /// Load config from a TOML file with RAGTUBE_* env var overrides.
    ///
    /// The file is the explicit path when given, otherwise
    /// `~/.ragtube/ragtube.toml`. A missing file is not an error. Nested keys
    /// are addressed with a double underscore: `RAGTUBE_API__BASE_URL`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        tracing::debug!(path = %path, "loading configuration");

        let config: RagtubeConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("RAGTUBE_").split("__"))
            .extract()
            .map_err(|e| crate::error::RagtubeError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.ragtube/ragtube.toml", home)
}
