// radar/src/commands/parse.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::application::ParseUseCase;
use radar_core::infrastructure::adapters::ParserRegistry;

use super::ConfigPaths;

pub fn execute(paths: &ConfigPaths, dataset_id: &str, input: &Path, output: &Path) -> Result<()> {
    let config = paths.load()?;
    let dataset = config.dataset(dataset_id)?;

    let artifact = ParseUseCase::new(ParserRegistry::default())
        .execute(dataset, input, output)
        .with_context(|| format!("Parse failed for dataset '{}'", dataset_id))?;

    println!(
        "🧾 {}: {} records parsed from {:?}",
        dataset_id,
        artifact.records.len(),
        artifact.source_file
    );
    Ok(())
}
