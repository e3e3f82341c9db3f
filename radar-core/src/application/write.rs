// radar-core/src/application/write.rs

use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::application::artifacts::{SeriesArtifact, stage_json};
use crate::error::RadarError;
use crate::infrastructure::adapters::{CsvSink, ParquetSink};
use crate::infrastructure::fs::load_json;
use crate::ports::sink::{Sink, SinkFormat};

pub struct WriteUseCase {
    sink: Box<dyn Sink>,
}

impl WriteUseCase {
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Sink for `format`. Partitioning only exists for Parquet.
    pub fn for_format(format: SinkFormat, partition_by_series: bool) -> Self {
        let sink: Box<dyn Sink> = match format {
            SinkFormat::Parquet => Box::new(ParquetSink {
                partition_by_series,
            }),
            SinkFormat::Csv => Box::new(CsvSink::default()),
        };
        Self::new(sink)
    }

    pub fn format(&self) -> SinkFormat {
        self.sink.format()
    }

    pub async fn write(&self, artifact: &SeriesArtifact, output_dir: &Path) -> Result<Vec<PathBuf>, RadarError> {
        let dest = output_dir.join(format!("{}.{}", artifact.dataset_id, self.sink.format().extension()));
        self.sink.write(&artifact.observations, &dest).await
    }

    /// `quality_dir/<id>.json` -> `output_dir/<id>.<ext>`.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        dataset_id: &str,
        quality_dir: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, RadarError> {
        let artifact: SeriesArtifact = load_json(&stage_json(quality_dir, dataset_id))?;
        self.write(&artifact, output_dir).await
    }
}
