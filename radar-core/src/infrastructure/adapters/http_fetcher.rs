// radar-core/src/infrastructure/adapters/http_fetcher.rs

use async_trait::async_trait;
use reqwest::header::{
    CONTENT_LENGTH, CONTENT_TYPE, ETAG, HeaderMap, HeaderName, LAST_MODIFIED, USER_AGENT,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::error::RadarError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, sha256_hex};
use crate::ports::fetcher::{FetchMetadata, FetchResult, Fetcher};

pub const DEFAULT_USER_AGENT: &str = concat!("radar/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;

/// Downloads `http(s)://` sources. `file://` URLs and plain paths are copied,
/// which keeps local fixtures and offline runs on the same code path.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
    retries: u32,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, InfrastructureError> {
        Self::with_options(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_RETRIES,
            DEFAULT_USER_AGENT,
        )
    }

    pub fn with_options(
        timeout: Duration,
        retries: u32,
        user_agent: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
            retries,
        })
    }

    async fn download(&self, url: &str) -> Result<(Vec<u8>, FetchMetadata), InfrastructureError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .client
                .get(url)
                .header(USER_AGENT, &self.user_agent)
                .send()
                .await
                .and_then(|r| r.error_for_status());

            match result {
                Ok(response) => {
                    let metadata = metadata_from_headers(response.headers());
                    let body = response.bytes().await?;
                    return Ok((body.to_vec(), metadata));
                }
                Err(e) if attempt <= self.retries && is_transient(&e) => {
                    let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                    warn!(url, attempt, error = %e, "Transient fetch failure, retrying in {:?}", backoff);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchResult, RadarError> {
        let (bytes, metadata) = match local_path(url) {
            Some(source) => {
                let bytes = tokio::fs::read(&source).await.map_err(InfrastructureError::Io)?;
                let metadata = FetchMetadata {
                    content_length: Some(bytes.len() as u64),
                    ..Default::default()
                };
                (bytes, metadata)
            }
            None => self.download(url).await?,
        };

        let sha256 = sha256_hex(&bytes);
        atomic_write(dest, &bytes)?;
        info!(path = ?dest, bytes = bytes.len(), sha256 = %sha256, "Source fetched");

        Ok(FetchResult {
            path: dest.to_path_buf(),
            metadata,
            sha256,
        })
    }
}

/// `None` for network URLs.
fn local_path(url: &str) -> Option<PathBuf> {
    if let Some(rest) = url.strip_prefix("file://") {
        return Some(PathBuf::from(rest));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return None;
    }
    Some(PathBuf::from(url))
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout()
        || err.is_connect()
        || err.status().is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
}

fn metadata_from_headers(headers: &HeaderMap) -> FetchMetadata {
    let text = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    FetchMetadata {
        etag: text(ETAG),
        last_modified: text(LAST_MODIFIED),
        content_type: text(CONTENT_TYPE),
        content_length: text(CONTENT_LENGTH).and_then(|v| v.parse().ok()),
    }
}
