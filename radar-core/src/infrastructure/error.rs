// radar-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(radar::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(radar::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(radar::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(radar::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(radar::infra::validation),
        help("A required field is empty or malformed in datasets.yml.")
    )]
    Validation(#[from] validator::ValidationErrors),

    #[error("Dataset '{0}' not found in configuration")]
    #[diagnostic(code(radar::infra::dataset_not_found))]
    DatasetNotFound(String),

    #[error("Quality profile '{0}' not found")]
    #[diagnostic(
        code(radar::infra::profile_not_found),
        help("Declare the profile under 'profiles:' in quality.yml.")
    )]
    ProfileNotFound(String),

    // --- NETWORK ---
    #[error("HTTP Error: {0}")]
    #[diagnostic(
        code(radar::infra::http),
        help("Check the source URL and your network connection.")
    )]
    Http(#[from] reqwest::Error),

    // --- FORMATS ---
    #[error("CSV Error: {0}")]
    #[diagnostic(code(radar::infra::csv))]
    Csv(#[from] csv::Error),

    #[error("Parquet Error: {0}")]
    #[diagnostic(code(radar::infra::parquet))]
    Parquet(String),

    #[error("Unsupported file format: {0}")]
    #[diagnostic(
        code(radar::infra::unsupported_format),
        help("Only CSV sources are parsed. Export spreadsheets to CSV first.")
    )]
    UnsupportedFormat(String),

    #[error("Normalization failed at record {row}: {reason}")]
    #[diagnostic(code(radar::infra::normalize))]
    Normalization { row: usize, reason: String },
}

impl From<datafusion::parquet::errors::ParquetError> for InfrastructureError {
    fn from(err: datafusion::parquet::errors::ParquetError) -> Self {
        InfrastructureError::Parquet(err.to_string())
    }
}

impl From<datafusion::arrow::error::ArrowError> for InfrastructureError {
    fn from(err: datafusion::arrow::error::ArrowError) -> Self {
        InfrastructureError::Parquet(err.to_string())
    }
}
