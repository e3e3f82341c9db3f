// radar/src/commands/normalize.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::application::NormalizeUseCase;
use radar_core::infrastructure::adapters::MappingNormalizer;

use super::ConfigPaths;

pub fn execute(paths: &ConfigPaths, dataset_id: &str, input: &Path, output: &Path) -> Result<()> {
    let config = paths.load()?;
    let dataset = config.dataset(dataset_id)?;

    let artifact = NormalizeUseCase::new(MappingNormalizer)
        .execute(dataset, input, output)
        .with_context(|| format!("Normalize failed for dataset '{}'", dataset_id))?;

    println!(
        "📐 {}: {} observations for series {} ({})",
        dataset_id,
        artifact.observations.len(),
        artifact.series.code,
        artifact.series.frequency
    );
    Ok(())
}
