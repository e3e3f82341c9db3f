// radar/src/commands/write.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::application::WriteUseCase;
use radar_core::ports::SinkFormat;

pub async fn execute(
    dataset_id: &str,
    input: &Path,
    output: &Path,
    format: SinkFormat,
    partition: bool,
) -> Result<()> {
    let files = WriteUseCase::for_format(format, partition)
        .execute(dataset_id, input, output)
        .await
        .with_context(|| format!("Write failed for dataset '{}'", dataset_id))?;

    for file in files {
        println!("💾 {:?}", file);
    }
    Ok(())
}
