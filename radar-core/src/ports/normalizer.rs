// radar-core/src/ports/normalizer.rs

use crate::domain::series::{Observation, Provenance, Series};
use crate::error::RadarError;
use crate::infrastructure::config::DatasetConfig;
use crate::ports::RawRecord;

pub trait Normalizer: Send + Sync {
    fn normalize(
        &self,
        records: &[RawRecord],
        dataset: &DatasetConfig,
        provenance: Option<&Provenance>,
    ) -> Result<(Series, Vec<Observation>), RadarError>;
}
