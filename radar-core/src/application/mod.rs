// radar-core/src/application/mod.rs

pub mod artifacts;
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod quality;
pub mod write;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI can write `use radar_core::application::{run_pipeline, Pipeline};`
// without knowing the file layout.

pub use artifacts::{FetchRecord, ParsedArtifact, SeriesArtifact, StageDirs};
pub use fetch::FetchUseCase;
pub use normalize::NormalizeUseCase;
pub use parse::ParseUseCase;
pub use pipeline::{DatasetOutcome, Pipeline, RunOptions, RunResult, run_pipeline};
pub use quality::{QualityOutcome, QualityUseCase};
pub use write::WriteUseCase;
