// radar/src/commands/mod.rs

pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod quality;
pub mod report;
pub mod run;
pub mod write;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use radar_core::infrastructure::config::{RadarConfig, load_configs};

/// Config file locations given on the command line.
pub struct ConfigPaths {
    pub datasets: PathBuf,
    pub quality: PathBuf,
}

impl ConfigPaths {
    pub fn load(&self) -> Result<RadarConfig> {
        debug!(datasets = ?self.datasets, quality = ?self.quality, "Loading configuration");
        load_configs(&self.datasets, Some(&self.quality))
            .with_context(|| format!("Failed to load configuration from {:?}", self.datasets))
    }
}
