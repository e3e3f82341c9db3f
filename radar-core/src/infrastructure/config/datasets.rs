// radar-core/src/infrastructure/config/datasets.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// --- DTOs (datasets.yml) ---

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct DatasetList {
    #[validate(nested)]
    #[validate(custom(function = "validate_unique_ids"))]
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct DatasetConfig {
    #[validate(length(min = 1, message = "Dataset id cannot be empty"))]
    pub id: String,
    pub provider: String,
    pub name: String,

    #[validate(nested)]
    pub source: SourceConfig,

    #[validate(nested)]
    pub normalize: NormalizeConfig,

    #[validate(length(min = 1, message = "quality_profile cannot be empty"))]
    pub quality_profile: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct SourceConfig {
    /// e.g. "static_url".
    #[serde(rename = "type")]
    pub kind: String,

    /// http(s) URL, `file://` URL or local path.
    #[validate(length(min = 1, message = "Source url cannot be empty"))]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cell: Option<String>,

    #[validate(nested)]
    pub columns: ColumnMapping,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,

    /// Data records to skip after the header row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row: Option<usize>,
}

/// Source header names for the date and value columns.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct ColumnMapping {
    #[validate(length(min = 1, message = "Date column cannot be empty"))]
    pub date: String,
    #[validate(length(min = 1, message = "Value column cannot be empty"))]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct NormalizeConfig {
    #[validate(length(min = 1, message = "internal_series_code cannot be empty"))]
    pub internal_series_code: String,
    pub unit: String,
    /// Parsed into `Frequency` by the normalizer, so a typo fails there with a clear error.
    pub frequency: String,

    /// Multiplier applied to every value (e.g. 1e-3 for thousands -> millions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Snap timestamps to the start of their frequency period.
    #[serde(default)]
    pub align_to_period: bool,

    /// chrono format string tried before the built-in formats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl SourceConfig {
    /// Extension of the file behind `url`, lowercased, without query string.
    pub fn extension(&self) -> Option<String> {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        let (stem, ext) = file.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

fn validate_unique_ids(datasets: &[DatasetConfig]) -> Result<(), validator::ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for ds in datasets {
        if !seen.insert(ds.id.as_str()) {
            let mut err = validator::ValidationError::new("duplicate_dataset_id");
            err.message = Some(format!("Dataset id '{}' is declared twice", ds.id).into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn source(url: &str) -> SourceConfig {
        SourceConfig {
            kind: "static_url".into(),
            url: url.into(),
            sheet: None,
            start_cell: None,
            columns: ColumnMapping {
                date: "fecha".into(),
                value: "valor".into(),
            },
            delimiter: None,
            start_row: None,
        }
    }

    #[test]
    fn test_extension_ignores_query_string() {
        assert_eq!(
            source("https://example.org/data/ipc.CSV?download=1").extension(),
            Some("csv".into())
        );
        assert_eq!(source("file:///tmp/series.xlsx").extension(), Some("xlsx".into()));
        assert_eq!(source("https://example.org/download").extension(), None);
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let mut src = source("");
        src.columns.value = String::new();
        let errors = src.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("url"));
        assert!(fields.contains_key("columns"));
    }
}
