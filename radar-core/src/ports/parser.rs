// radar-core/src/ports/parser.rs

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::RadarError;
use crate::infrastructure::config::SourceConfig;

/// One source row, keyed by the configured column names ("date", "value").
pub type RawRecord = BTreeMap<String, String>;

pub trait Parser: Send + Sync {
    fn supports(&self, path: &Path) -> bool;

    fn parse(&self, path: &Path, source: &SourceConfig) -> Result<Vec<RawRecord>, RadarError>;
}
