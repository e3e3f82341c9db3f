// radar-core/src/application/quality.rs

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::artifacts::{SeriesArtifact, stage_json};
use crate::domain::ports::Cleaner;
use crate::domain::quality::{QualityProfile, QualityReport};
use crate::error::RadarError;
use crate::infrastructure::fs::{load_json, save_json};
use crate::infrastructure::report::save_report;

pub struct QualityOutcome {
    pub cleaned: SeriesArtifact,
    pub report: QualityReport,
    pub report_path: PathBuf,
}

pub struct QualityUseCase<C: Cleaner> {
    cleaner: C,
}

impl<C: Cleaner> QualityUseCase<C> {
    pub fn new(cleaner: C) -> Self {
        Self { cleaner }
    }

    /// `normalized_dir/<id>.json` -> `quality_dir/<id>.json` (cleaned series)
    /// plus `<id>.report.json` and `<id>.report.txt`.
    #[instrument(skip(self, profile))]
    pub fn execute(
        &self,
        dataset_id: &str,
        profile: &QualityProfile,
        normalized_dir: &Path,
        quality_dir: &Path,
    ) -> Result<QualityOutcome, RadarError> {
        let normalized: SeriesArtifact = load_json(&stage_json(normalized_dir, dataset_id))?;
        let (observations, report) = self.cleaner.clean(&normalized.observations, profile)?;

        info!(
            input = normalized.observations.len(),
            kept = observations.len(),
            issues = report.total_issues(),
            "Quality checks applied"
        );

        let cleaned = SeriesArtifact {
            observations,
            ..normalized
        };
        save_json(&stage_json(quality_dir, dataset_id), &cleaned)?;

        let report_path = quality_dir.join(format!("{}.report.json", dataset_id));
        save_report(dataset_id, &report, &report_path)?;
        save_report(dataset_id, &report, &quality_dir.join(format!("{}.report.txt", dataset_id)))?;

        Ok(QualityOutcome {
            cleaned,
            report,
            report_path,
        })
    }
}
