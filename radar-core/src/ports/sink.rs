// radar-core/src/ports/sink.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::series::Observation;
use crate::error::RadarError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    #[default]
    Parquet,
    Csv,
}

impl SinkFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for SinkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[async_trait]
pub trait Sink: Send + Sync {
    fn format(&self) -> SinkFormat;

    /// Writes observations under `dest` and returns the path(s) produced.
    async fn write(&self, observations: &[Observation], dest: &Path) -> Result<Vec<PathBuf>, RadarError>;
}
