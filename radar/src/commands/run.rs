// radar/src/commands/run.rs

use anyhow::{Context, Result};
use std::path::PathBuf;

use radar_core::application::{Pipeline, RunOptions, run_pipeline};
use radar_core::infrastructure::config::data_dir_override;
use radar_core::ports::SinkFormat;

use super::ConfigPaths;

pub async fn execute(
    paths: &ConfigPaths,
    select: Vec<String>,
    data_dir: PathBuf,
    format: SinkFormat,
    partition: bool,
    concurrency: usize,
) -> Result<()> {
    let config = paths.load()?;

    let options = RunOptions {
        select,
        format,
        partition_by_series: partition,
        concurrency,
        ..RunOptions::new(data_dir_override(&data_dir))
    };

    let pipeline = Pipeline::standard(options.format, options.partition_by_series)?;
    let result = run_pipeline(&pipeline, &config, &options)
        .await
        .context("Pipeline execution failed")?;

    if !result.success {
        eprintln!("❌ {} dataset(s) failed:", result.errors.len());
        for e in &result.errors {
            eprintln!("    - {}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}
