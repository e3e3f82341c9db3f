// radar-core/src/ports/fetcher.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RadarError;

/// Response headers worth keeping for lineage. All optional: local copies
/// and some servers provide none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub path: PathBuf,
    pub metadata: FetchMetadata,
    /// Hex SHA-256 of the downloaded bytes.
    pub sha256: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads `url` into `dest` (a file path, parent directories created).
    async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchResult, RadarError>;
}
