// radar-core/src/infrastructure/adapters/parquet_sink.rs

use async_trait::async_trait;
use datafusion::arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray};
use datafusion::arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::parquet::arrow::ArrowWriter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::series::Observation;
use crate::error::RadarError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::sink::{Sink, SinkFormat};

pub const PARTITION_COLUMN: &str = "series_code";
const PARTITION_FILE: &str = "part-0.parquet";

/// Arrow schema of the observation table.
pub fn observation_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("series_code", DataType::Utf8, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        Field::new("value", DataType::Float64, false),
    ]))
}

/// Writes observations as Parquet. With `partition_by_series`, `dest` is a
/// directory and each series lands in `series_code=<code>/part-0.parquet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetSink {
    pub partition_by_series: bool,
}

impl ParquetSink {
    pub fn partitioned() -> Self {
        Self {
            partition_by_series: true,
        }
    }

    pub fn to_record_batch(observations: &[Observation]) -> Result<RecordBatch, InfrastructureError> {
        let codes: StringArray = observations.iter().map(|o| Some(o.series_code.as_str())).collect();
        let timestamps = TimestampMicrosecondArray::from(
            observations
                .iter()
                .map(|o| o.timestamp.and_utc().timestamp_micros())
                .collect::<Vec<i64>>(),
        );
        let values = Float64Array::from(observations.iter().map(|o| o.value).collect::<Vec<f64>>());

        let columns: Vec<ArrayRef> = vec![Arc::new(codes), Arc::new(timestamps), Arc::new(values)];
        Ok(RecordBatch::try_new(observation_schema(), columns)?)
    }

    pub fn to_bytes(observations: &[Observation]) -> Result<Vec<u8>, InfrastructureError> {
        let batch = Self::to_record_batch(observations)?;
        let mut buffer = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(buffer)
    }
}

#[async_trait]
impl Sink for ParquetSink {
    fn format(&self) -> SinkFormat {
        SinkFormat::Parquet
    }

    #[instrument(skip(self, observations), fields(count = observations.len()))]
    async fn write(&self, observations: &[Observation], dest: &Path) -> Result<Vec<PathBuf>, RadarError> {
        if observations.is_empty() {
            return Err(RadarError::InternalError(
                "Cannot write an empty observation list".into(),
            ));
        }

        if !self.partition_by_series {
            atomic_write(dest, Self::to_bytes(observations)?)?;
            info!(path = ?dest, "Parquet written");
            return Ok(vec![dest.to_path_buf()]);
        }

        let mut groups: BTreeMap<&str, Vec<Observation>> = BTreeMap::new();
        for obs in observations {
            groups.entry(obs.series_code.as_str()).or_default().push(obs.clone());
        }

        let mut written = Vec::with_capacity(groups.len());
        for (code, group) in groups {
            let path = dest
                .join(format!("{}={}", PARTITION_COLUMN, code))
                .join(PARTITION_FILE);
            atomic_write(&path, Self::to_bytes(&group)?)?;
            info!(path = ?path, "Parquet partition written");
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use datafusion::arrow::array::Array;
    use datafusion::parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::fs::File;
    use tempfile::tempdir;

    fn obs(code: &str, day: u32, value: f64) -> Observation {
        let t = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Observation::new(code, t, value)
    }

    fn read_back(path: &Path) -> Result<Vec<RecordBatch>> {
        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
        Ok(reader.collect::<Result<Vec<_>, _>>()?)
    }

    #[tokio::test]
    async fn test_single_file_schema_and_rows() -> Result<()> {
        let dir = tempdir()?;
        let dest = dir.path().join("ipc.parquet");
        let data = vec![obs("IPC", 1, 100.0), obs("IPC", 2, 101.5)];

        ParquetSink::default().write(&data, &dest).await?;

        let batches = read_back(&dest)?;
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);
        let schema = batches[0].schema();
        assert_eq!(schema.field(0).name(), "series_code");
        assert_eq!(
            schema.field(1).data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, None)
        );

        let ts = batches[0]
            .column(1)
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .unwrap();
        assert_eq!(ts.value(0), data[0].timestamp.and_utc().timestamp_micros());
        assert!(!ts.is_null(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_partitioned_by_series() -> Result<()> {
        let dir = tempdir()?;
        let data = vec![obs("A", 1, 1.0), obs("B", 1, 2.0), obs("A", 2, 3.0)];

        let written = ParquetSink::partitioned().write(&data, dir.path()).await?;

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("series_code=A/part-0.parquet"));
        let rows: usize = read_back(&written[0])?.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        assert!(ParquetSink::default()
            .write(&[], &dir.path().join("x.parquet"))
            .await
            .is_err());
        Ok(())
    }
}
