// radar-core/src/application/fetch.rs

use chrono::Utc;
use std::path::Path;
use tracing::instrument;

use crate::application::artifacts::{FetchRecord, provenance_path};
use crate::domain::series::Provenance;
use crate::error::RadarError;
use crate::infrastructure::config::DatasetConfig;
use crate::infrastructure::fs::save_json;
use crate::ports::fetcher::Fetcher;

const DEFAULT_EXTENSION: &str = "csv";

pub struct FetchUseCase<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> FetchUseCase<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Downloads the dataset source into `raw_dir/<id>.<ext>` and writes the
    /// provenance sidecar next to it.
    #[instrument(skip(self, dataset), fields(dataset = %dataset.id))]
    pub async fn execute(&self, dataset: &DatasetConfig, raw_dir: &Path) -> Result<FetchRecord, RadarError> {
        let ext = dataset
            .source
            .extension()
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let dest = raw_dir.join(format!("{}.{}", dataset.id, ext));

        let fetched = self.fetcher.fetch(&dataset.source.url, &dest).await?;

        let record = FetchRecord {
            dataset_id: dataset.id.clone(),
            path: fetched.path,
            metadata: fetched.metadata,
            provenance: Provenance {
                source_url: dataset.source.url.clone(),
                fetched_at: Utc::now(),
                dataset_id: dataset.id.clone(),
                file_hash: Some(fetched.sha256),
            },
        };
        save_json(&provenance_path(raw_dir, &dataset.id), &record)?;
        Ok(record)
    }
}
