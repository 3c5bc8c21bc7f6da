//! Baseline retrieval
//!
//! Sources of the raw baseline text. The HTTP source makes a single attempt
//! and treats any non-success status as a fetch failure.

use crate::config::BaselineConfig;
use crate::error::SyncError;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Something that can produce baseline text
#[async_trait]
pub trait BaselineSource: Send + Sync {
    /// Fetch the raw baseline text
    async fn fetch(&self) -> Result<String, SyncError>;

    /// Human-readable origin (URL or path) for logs and reports
    fn describe(&self) -> String;
}

/// Baseline served over HTTP(S)
pub struct HttpBaselineSource {
    client: Client,
    url: String,
}

impl HttpBaselineSource {
    pub fn new(url: impl Into<String>, config: &BaselineConfig) -> Result<Self, SyncError> {
        let url = url.into();
        let client = build_http_client(config.connect_timeout(), config.request_timeout())
            .map_err(|e| SyncError::Fetch {
                url: url.clone(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client, url })
    }
}

fn build_http_client(connect: Duration, request: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("prefsync/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(connect)
        .timeout(request)
        .build()
}

fn map_http_error(url: &str, error: reqwest::Error) -> SyncError {
    let reason = if let Some(status) = error.status() {
        format!("server returned {}", status)
    } else if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    };
    SyncError::Fetch {
        url: url.to_string(),
        reason,
    }
}

#[async_trait]
impl BaselineSource for HttpBaselineSource {
    async fn fetch(&self) -> Result<String, SyncError> {
        tracing::info!(url = %self.url, "Fetching baseline");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| map_http_error(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Fetch {
                url: self.url.clone(),
                reason: format!("server returned {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_http_error(&self.url, e))?;
        tracing::debug!(bytes = body.len(), "Baseline downloaded");
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Baseline read from a local file
pub struct FileBaselineSource {
    path: PathBuf,
}

impl FileBaselineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BaselineSource for FileBaselineSource {
    async fn fetch(&self) -> Result<String, SyncError> {
        tracing::info!(path = %self.path.display(), "Reading baseline from file");
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SyncError::MissingFile(self.path.clone()))
            }
            Err(e) => Err(SyncError::io(&self.path, e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Drive a source to completion on a current-thread runtime.
pub fn fetch_blocking(source: &dyn BaselineSource) -> Result<String, SyncError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SyncError::Fetch {
            url: source.describe(),
            reason: format!("Failed to create runtime: {}", e),
        })?;
    rt.block_on(source.fetch())
}
