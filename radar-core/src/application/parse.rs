// radar-core/src/application/parse.rs

use std::path::Path;
use tracing::{instrument, warn};

use crate::application::artifacts::{FetchRecord, ParsedArtifact, find_raw_file, provenance_path, stage_json};
use crate::error::RadarError;
use crate::infrastructure::config::DatasetConfig;
use crate::infrastructure::fs::{load_json, save_json};
use crate::ports::parser::Parser;

pub struct ParseUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Parses `raw_dir/<id>.*` into `parsed_dir/<id>.json`. Provenance from
    /// the fetch sidecar is carried along when present.
    #[instrument(skip(self, dataset), fields(dataset = %dataset.id))]
    pub fn execute(
        &self,
        dataset: &DatasetConfig,
        raw_dir: &Path,
        parsed_dir: &Path,
    ) -> Result<ParsedArtifact, RadarError> {
        let source_file = find_raw_file(raw_dir, &dataset.id)?;
        let records = self.parser.parse(&source_file, &dataset.source)?;

        let sidecar = provenance_path(raw_dir, &dataset.id);
        let provenance = if sidecar.exists() {
            match load_json::<FetchRecord>(&sidecar) {
                Ok(record) => Some(record.provenance),
                Err(e) => {
                    warn!(path = ?sidecar, error = %e, "Unreadable provenance sidecar, continuing without it");
                    None
                }
            }
        } else {
            None
        };

        let artifact = ParsedArtifact {
            dataset_id: dataset.id.clone(),
            source_file,
            provenance,
            records,
        };
        save_json(&stage_json(parsed_dir, &dataset.id), &artifact)?;
        Ok(artifact)
    }
}
