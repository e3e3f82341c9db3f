// radar-core/src/infrastructure/config/loader.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::quality::QualityProfile;
use crate::infrastructure::config::datasets::{DatasetConfig, DatasetList};
use crate::infrastructure::error::InfrastructureError;

/// Overrides the data root of `radar run` (e.g. `RADAR_DATA_DIR=/srv/radar radar run`).
pub const DATA_DIR_ENV: &str = "RADAR_DATA_DIR";

/// Everything the pipeline needs from the `configs/` directory.
#[derive(Debug, Clone, Default)]
pub struct RadarConfig {
    pub datasets: Vec<DatasetConfig>,
    pub profiles: HashMap<String, QualityProfile>,
}

impl RadarConfig {
    pub fn dataset(&self, id: &str) -> Result<&DatasetConfig, InfrastructureError> {
        find_dataset(&self.datasets, id)
    }

    pub fn profile_for(&self, dataset: &DatasetConfig) -> Result<&QualityProfile, InfrastructureError> {
        resolve_profile(&self.profiles, &dataset.quality_profile)
    }
}

// --- LOADERS ---

/// Loads `datasets.yml` and, when given and present, `quality.yml`.
/// A missing quality file yields no profiles; a missing datasets file is an error.
#[instrument]
pub fn load_configs(
    datasets_path: &Path,
    quality_path: Option<&Path>,
) -> Result<RadarConfig, InfrastructureError> {
    let datasets = load_datasets(datasets_path)?;

    let profiles = match quality_path {
        Some(path) if path.exists() => load_quality_profiles(path)?,
        Some(path) => {
            warn!(path = ?path, "Quality config not found, no profiles loaded");
            HashMap::new()
        }
        None => HashMap::new(),
    };

    info!(datasets = datasets.len(), profiles = profiles.len(), "Configuration loaded");
    Ok(RadarConfig { datasets, profiles })
}

pub fn load_datasets(path: &Path) -> Result<Vec<DatasetConfig>, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()));
    }
    let list: DatasetList = load_fragment(path)?;
    list.validate()?;
    Ok(list.datasets)
}

pub fn load_quality_profiles(
    path: &Path,
) -> Result<HashMap<String, QualityProfile>, InfrastructureError> {
    #[derive(Deserialize)]
    struct ProfilesWrapper {
        #[serde(default)]
        profiles: HashMap<String, QualityProfile>,
    }

    let wrapper: ProfilesWrapper = load_fragment(path)?;
    Ok(wrapper.profiles)
}

/// Reads a typed YAML document.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path).map_err(InfrastructureError::Io)?;
    // An empty file deserializes as `null`; treat it like an empty mapping.
    if content.trim().is_empty() {
        return serde_yaml::from_str("{}").map_err(InfrastructureError::YamlError);
    }
    serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)
}

// --- LOOKUPS ---

pub fn find_dataset<'a>(
    datasets: &'a [DatasetConfig],
    id: &str,
) -> Result<&'a DatasetConfig, InfrastructureError> {
    datasets
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| InfrastructureError::DatasetNotFound(id.to_string()))
}

pub fn resolve_profile<'a>(
    profiles: &'a HashMap<String, QualityProfile>,
    name: &str,
) -> Result<&'a QualityProfile, InfrastructureError> {
    profiles
        .get(name)
        .ok_or_else(|| InfrastructureError::ProfileNotFound(name.to_string()))
}

// --- ENV LAYERING ---

/// `RADAR_DATA_DIR` wins over the value given on the command line.
pub fn data_dir_override(default: &Path) -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(val) if !val.trim().is_empty() => {
            info!(old = ?default, new = ?val, "Overriding data dir via ENV");
            PathBuf::from(val)
        }
        _ => default.to_path_buf(),
    }
}
