// radar-core/src/ports/mod.rs

// I/O contracts of the pipeline. Adapters live in `infrastructure::adapters`.

pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod sink;

pub use fetcher::{FetchMetadata, FetchResult, Fetcher};
pub use normalizer::Normalizer;
pub use parser::{Parser, RawRecord};
pub use sink::{Sink, SinkFormat};
