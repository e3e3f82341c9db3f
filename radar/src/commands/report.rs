// radar/src/commands/report.rs

use anyhow::{Context, Result};
use std::path::Path;

use radar_core::QualityReport;
use radar_core::infrastructure::fs::load_json;
use radar_core::infrastructure::report::{render_text, to_json};

pub fn execute(dataset_id: &str, input: &Path, json: bool) -> Result<()> {
    let path = input.join(format!("{}.report.json", dataset_id));
    let report: QualityReport = load_json(&path)
        .with_context(|| format!("No quality report at {:?}. Run `radar quality {}` first", path, dataset_id))?;

    if json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", render_text(dataset_id, &report));
    }
    Ok(())
}
