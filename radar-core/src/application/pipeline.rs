// radar-core/src/application/pipeline.rs

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::application::artifacts::StageDirs;
use crate::application::fetch::FetchUseCase;
use crate::application::normalize::NormalizeUseCase;
use crate::application::parse::ParseUseCase;
use crate::application::quality::QualityUseCase;
use crate::application::write::WriteUseCase;
use crate::domain::ports::Cleaner;
use crate::domain::quality::{QualityCounts, QualityEngine};
use crate::error::RadarError;
use crate::infrastructure::adapters::{HttpFetcher, MappingNormalizer, ParserRegistry};
use crate::infrastructure::config::{DatasetConfig, RadarConfig};
use crate::infrastructure::fs::save_json;
use crate::ports::fetcher::Fetcher;
use crate::ports::normalizer::Normalizer;
use crate::ports::parser::Parser;
use crate::ports::sink::SinkFormat;

pub const RUN_RESULTS_FILE: &str = "run_results.json";
const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_root: PathBuf,
    /// Dataset ids to run; empty means all of them.
    pub select: Vec<String>,
    pub format: SinkFormat,
    pub partition_by_series: bool,
    pub concurrency: usize,
}

impl RunOptions {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            select: Vec::new(),
            format: SinkFormat::default(),
            partition_by_series: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOutcome {
    pub dataset_id: String,
    pub observations_in: usize,
    pub observations_out: usize,
    pub issues: QualityCounts,
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub datasets_processed: usize,
    pub outcomes: Vec<DatasetOutcome>,
    pub errors: Vec<String>,
}

/// The four stage use cases plus the writer, wired to concrete ports.
pub struct Pipeline<F: Fetcher, P: Parser, N: Normalizer, C: Cleaner> {
    pub fetch: FetchUseCase<F>,
    pub parse: ParseUseCase<P>,
    pub normalize: NormalizeUseCase<N>,
    pub quality: QualityUseCase<C>,
    pub write: WriteUseCase,
}

impl Pipeline<HttpFetcher, ParserRegistry, MappingNormalizer, QualityEngine> {
    /// HTTP fetcher, CSV parsing, mapping normalizer and the quality engine.
    pub fn standard(format: SinkFormat, partition_by_series: bool) -> Result<Self, RadarError> {
        Ok(Self {
            fetch: FetchUseCase::new(HttpFetcher::new()?),
            parse: ParseUseCase::new(ParserRegistry::default()),
            normalize: NormalizeUseCase::new(MappingNormalizer),
            quality: QualityUseCase::new(QualityEngine::new()),
            write: WriteUseCase::for_format(format, partition_by_series),
        })
    }
}

impl<F: Fetcher, P: Parser, N: Normalizer, C: Cleaner> Pipeline<F, P, N, C> {
    /// Runs every stage for one dataset, persisting each stage artifact.
    pub async fn run_dataset(
        &self,
        dataset: &DatasetConfig,
        config: &RadarConfig,
        dirs: &StageDirs,
    ) -> Result<DatasetOutcome, RadarError> {
        // Resolve the profile first: no point downloading for a dataset that cannot be checked.
        let profile = config.profile_for(dataset)?;

        self.fetch.execute(dataset, &dirs.raw).await?;
        self.parse.execute(dataset, &dirs.raw, &dirs.parsed)?;
        let normalized = self
            .normalize
            .execute(dataset, &dirs.parsed, &dirs.normalized)?;
        let outcome = self
            .quality
            .execute(&dataset.id, profile, &dirs.normalized, &dirs.quality)?;
        let outputs = self.write.write(&outcome.cleaned, &dirs.output).await?;

        Ok(DatasetOutcome {
            dataset_id: dataset.id.clone(),
            observations_in: normalized.observations.len(),
            observations_out: outcome.cleaned.observations.len(),
            issues: outcome.report.counts(),
            outputs,
        })
    }
}

/// Runs the selected datasets with bounded concurrency. A failing dataset is
/// recorded in the result and does not stop the others. Unknown ids in
/// `select` fail the run before anything is fetched.
pub async fn run_pipeline<F, P, N, C>(
    pipeline: &Pipeline<F, P, N, C>,
    config: &RadarConfig,
    options: &RunOptions,
) -> Result<RunResult, RadarError>
where
    F: Fetcher,
    P: Parser,
    N: Normalizer,
    C: Cleaner,
{
    println!("🚀 Starting radar pipeline...");
    let start_time = std::time::Instant::now();

    let selected = select_datasets(config, &options.select)?;
    let dirs = StageDirs::under(&options.data_root);
    println!(
        "📦 {} dataset(s) -> {:?} ({})",
        selected.len(),
        options.data_root,
        pipeline.write.format()
    );

    let futures = selected.iter().map(|dataset| {
        let dirs = &dirs;
        async move {
            let res = pipeline.run_dataset(dataset, config, dirs).await;
            (dataset.id.clone(), res)
        }
    });
    let results: Vec<_> = futures::stream::iter(futures)
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    let mut outcomes = Vec::new();
    let mut errors = Vec::new();
    for (dataset_id, res) in results {
        match res {
            Ok(outcome) => {
                println!(
                    "    ✅ {}: {} -> {} observations ({} gaps, {} outliers, {} range violations)",
                    dataset_id,
                    outcome.observations_in,
                    outcome.observations_out,
                    outcome.issues.gaps,
                    outcome.issues.outliers,
                    outcome.issues.range_violations
                );
                outcomes.push(outcome);
            }
            Err(e) => {
                error!(dataset = %dataset_id, error = %e, "Dataset failed");
                eprintln!("    ❌ {}: {}", dataset_id, e);
                errors.push(format!("{}: {}", dataset_id, e));
            }
        }
    }
    outcomes.sort_by(|a, b| a.dataset_id.cmp(&b.dataset_id));
    errors.sort();

    let result = RunResult {
        success: errors.is_empty(),
        datasets_processed: outcomes.len(),
        outcomes,
        errors,
    };
    save_json(&options.data_root.join(RUN_RESULTS_FILE), &result)?;

    info!(
        processed = result.datasets_processed,
        failed = result.errors.len(),
        "Pipeline finished"
    );
    println!(
        "✨ Done in {:.2}s. {} succeeded, {} failed.",
        start_time.elapsed().as_secs_f64(),
        result.datasets_processed,
        result.errors.len()
    );
    Ok(result)
}

fn select_datasets<'a>(config: &'a RadarConfig, select: &[String]) -> Result<Vec<&'a DatasetConfig>, RadarError> {
    if select.is_empty() {
        return Ok(config.datasets.iter().collect());
    }
    select
        .iter()
        .map(|id| config.dataset(id).map_err(RadarError::from))
        .collect()
}

/// Path of the run summary for a data root.
pub fn run_results_path(data_root: &Path) -> PathBuf {
    data_root.join(RUN_RESULTS_FILE)
}
