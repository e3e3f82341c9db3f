// radar-core/src/application/artifacts.rs

// On-disk hand-off between stages. Layout under a data root:
//   raw/<id>.<ext>, raw/<id>.provenance.json
//   parsed/<id>.json
//   normalized/<id>.json
//   quality/<id>.json, quality/<id>.report.json, quality/<id>.report.txt
//   output/<id>.<parquet|csv>

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::series::{Observation, Provenance, Series};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::fetcher::FetchMetadata;
use crate::ports::parser::RawRecord;

pub const PROVENANCE_SUFFIX: &str = ".provenance.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDirs {
    pub raw: PathBuf,
    pub parsed: PathBuf,
    pub normalized: PathBuf,
    pub quality: PathBuf,
    pub output: PathBuf,
}

impl StageDirs {
    pub fn under(root: &Path) -> Self {
        Self {
            raw: root.join("raw"),
            parsed: root.join("parsed"),
            normalized: root.join("normalized"),
            quality: root.join("quality"),
            output: root.join("output"),
        }
    }
}

/// Sidecar written next to a fetched file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRecord {
    pub dataset_id: String,
    pub path: PathBuf,
    pub metadata: FetchMetadata,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedArtifact {
    pub dataset_id: String,
    pub source_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    pub records: Vec<RawRecord>,
}

/// A series with its observations; used for both normalized and cleaned data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesArtifact {
    pub dataset_id: String,
    pub series: Series,
    pub observations: Vec<Observation>,
}

pub fn provenance_path(raw_dir: &Path, dataset_id: &str) -> PathBuf {
    raw_dir.join(format!("{}{}", dataset_id, PROVENANCE_SUFFIX))
}

pub fn stage_json(dir: &Path, dataset_id: &str) -> PathBuf {
    dir.join(format!("{}.json", dataset_id))
}

/// Finds `raw/<id>.<ext>`, ignoring the provenance sidecar.
pub fn find_raw_file(raw_dir: &Path, dataset_id: &str) -> Result<PathBuf, InfrastructureError> {
    let prefix = format!("{}.", dataset_id);
    let mut candidates: Vec<PathBuf> = WalkDir::new(raw_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.starts_with(&prefix) && !name.ends_with(PROVENANCE_SUFFIX)
        })
        .map(|e| e.into_path())
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        InfrastructureError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "No raw file for dataset '{}' in {:?}. Run `radar fetch {}` first.",
                dataset_id, raw_dir, dataset_id
            ),
        ))
    })
}
