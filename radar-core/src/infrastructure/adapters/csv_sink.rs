// radar-core/src/infrastructure/adapters/csv_sink.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::series::Observation;
use crate::error::RadarError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::sink::{Sink, SinkFormat};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const HEADER: [&str; 3] = ["series_code", "timestamp", "value"];

#[derive(Debug, Clone, Copy)]
pub struct CsvSink {
    pub include_header: bool,
    pub delimiter: u8,
}

impl Default for CsvSink {
    fn default() -> Self {
        Self {
            include_header: true,
            delimiter: b',',
        }
    }
}

impl CsvSink {
    pub fn to_bytes(&self, observations: &[Observation]) -> Result<Vec<u8>, InfrastructureError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if self.include_header {
            writer.write_record(HEADER)?;
        }
        for obs in observations {
            writer.write_record([
                obs.series_code.clone(),
                obs.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                obs.value.to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))
    }
}

#[async_trait]
impl Sink for CsvSink {
    fn format(&self) -> SinkFormat {
        SinkFormat::Csv
    }

    #[instrument(skip(self, observations), fields(count = observations.len()))]
    async fn write(&self, observations: &[Observation], dest: &Path) -> Result<Vec<PathBuf>, RadarError> {
        if observations.is_empty() {
            return Err(RadarError::InternalError(
                "Cannot write an empty observation list".into(),
            ));
        }
        let bytes = self.to_bytes(observations)?;
        atomic_write(dest, bytes)?;
        info!(path = ?dest, "CSV written");
        Ok(vec![dest.to_path_buf()])
    }
}
