// radar-core/src/infrastructure/config/mod.rs

pub mod datasets;
pub mod loader;

pub use datasets::{ColumnMapping, DatasetConfig, DatasetList, NormalizeConfig, SourceConfig};
pub use loader::{
    data_dir_override, find_dataset, load_configs, load_datasets, load_quality_profiles,
    resolve_profile, RadarConfig, DATA_DIR_ENV,
};
