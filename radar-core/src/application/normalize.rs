// radar-core/src/application/normalize.rs

use std::path::Path;
use tracing::instrument;

use crate::application::artifacts::{ParsedArtifact, SeriesArtifact, stage_json};
use crate::error::RadarError;
use crate::infrastructure::config::DatasetConfig;
use crate::infrastructure::fs::{load_json, save_json};
use crate::ports::normalizer::Normalizer;

pub struct NormalizeUseCase<N: Normalizer> {
    normalizer: N,
}

impl<N: Normalizer> NormalizeUseCase<N> {
    pub fn new(normalizer: N) -> Self {
        Self { normalizer }
    }

    pub fn normalize(&self, parsed: &ParsedArtifact, dataset: &DatasetConfig) -> Result<SeriesArtifact, RadarError> {
        let (series, observations) =
            self.normalizer
                .normalize(&parsed.records, dataset, parsed.provenance.as_ref())?;
        Ok(SeriesArtifact {
            dataset_id: dataset.id.clone(),
            series,
            observations,
        })
    }

    /// `parsed_dir/<id>.json` -> `normalized_dir/<id>.json`.
    #[instrument(skip(self, dataset), fields(dataset = %dataset.id))]
    pub fn execute(
        &self,
        dataset: &DatasetConfig,
        parsed_dir: &Path,
        normalized_dir: &Path,
    ) -> Result<SeriesArtifact, RadarError> {
        let parsed: ParsedArtifact = load_json(&stage_json(parsed_dir, &dataset.id))?;
        let artifact = self.normalize(&parsed, dataset)?;
        save_json(&stage_json(normalized_dir, &dataset.id), &artifact)?;
        Ok(artifact)
    }
}
