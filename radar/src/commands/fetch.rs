// radar/src/commands/fetch.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::application::FetchUseCase;
use radar_core::infrastructure::adapters::HttpFetcher;

use super::ConfigPaths;

pub async fn execute(paths: &ConfigPaths, dataset_id: &str, output: &Path) -> Result<()> {
    let config = paths.load()?;
    let dataset = config.dataset(dataset_id)?;

    println!("📥 Fetching {} from {}", dataset.id, dataset.source.url);
    let use_case = FetchUseCase::new(HttpFetcher::new()?);
    let record = use_case
        .execute(dataset, output)
        .await
        .with_context(|| format!("Fetch failed for dataset '{}'", dataset_id))?;

    println!(
        "✅ Saved {:?} (sha256 {})",
        record.path,
        record.provenance.file_hash.as_deref().unwrap_or("-")
    );
    Ok(())
}
