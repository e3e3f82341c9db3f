// radar-core/src/infrastructure/adapters/mod.rs

pub mod csv_reader;
pub mod csv_sink;
pub mod http_fetcher;
pub mod mapping_normalizer;
pub mod parquet_sink;

pub use csv_reader::{CsvReader, ParserRegistry};
pub use csv_sink::CsvSink;
pub use http_fetcher::HttpFetcher;
pub use mapping_normalizer::MappingNormalizer;
pub use parquet_sink::ParquetSink;
