//! Native results source: local files and http(s) URLs

use bench_report_core::{Fetch, FetchError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Resolves `file` parameters against a base directory or fetches them over HTTP
#[derive(Debug, Clone)]
pub struct Source {
    base_dir: PathBuf,
    client: reqwest::Client,
}

impl Source {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Parsed URL when the resource is remote
    fn remote(resource: &str) -> Option<Url> {
        Url::parse(resource)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
    }

    async fn fetch_remote(&self, url: Url) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn fetch_local(&self, resource: &str) -> Result<String, FetchError> {
        let path = self.base_dir.join(resource);
        debug!(path = %path.display(), "reading");

        tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            // Mirror what a static file server would answer
            ErrorKind::NotFound => FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            },
            ErrorKind::PermissionDenied => FetchError::Status {
                status: 403,
                reason: "Forbidden".to_string(),
            },
            _ => FetchError::Transport(format!("{}: {}", path.display(), e)),
        })
    }
}

impl Fetch for Source {
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError> {
        match Self::remote(resource) {
            Some(url) => self.fetch_remote(url).await,
            None => self.fetch_local(resource).await,
        }
    }
}
