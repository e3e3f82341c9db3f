// radar/src/commands/quality.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::application::QualityUseCase;
use radar_core::QualityEngine;

use super::ConfigPaths;

pub fn execute(paths: &ConfigPaths, dataset_id: &str, input: &Path, output: &Path) -> Result<()> {
    let config = paths.load()?;
    let dataset = config.dataset(dataset_id)?;
    let profile = config.profile_for(dataset)?;

    let outcome = QualityUseCase::new(QualityEngine::new())
        .execute(&dataset.id, profile, input, output)
        .with_context(|| format!("Quality checks failed for dataset '{}'", dataset_id))?;

    let counts = outcome.report.counts();
    println!(
        "🧪 {}: {} kept, {} removed ({} gaps, {} outliers, {} range violations)",
        dataset_id,
        outcome.cleaned.observations.len(),
        outcome.report.removed,
        counts.gaps,
        counts.outliers,
        counts.range_violations
    );
    for warning in &outcome.report.warnings {
        println!("    ⚠️  {}", warning);
    }
    println!("📄 Report: {:?}", outcome.report_path);
    Ok(())
}
