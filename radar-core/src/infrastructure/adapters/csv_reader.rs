// radar-core/src/infrastructure/adapters/csv_reader.rs

use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::RadarError;
use crate::infrastructure::config::SourceConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::parser::{Parser, RawRecord};

/// Canonical keys of a `RawRecord`.
pub const DATE_KEY: &str = "date";
pub const VALUE_KEY: &str = "value";

const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];
const SPREADSHEET_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "ods"];

/// Delimited text reader. Picks the configured date/value columns by header
/// name and emits them under the canonical `date` / `value` keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReader;

impl Parser for CsvReader {
    fn supports(&self, path: &Path) -> bool {
        extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }

    #[instrument(skip(self, source), fields(path = ?path))]
    fn parse(&self, path: &Path, source: &SourceConfig) -> Result<Vec<RawRecord>, RadarError> {
        let file = File::open(path).map_err(InfrastructureError::Io)?;
        let delimiter = match (source.delimiter, extension(path).as_deref()) {
            (Some(c), _) => u8::try_from(c).map_err(|_| {
                InfrastructureError::ConfigError(format!("Delimiter '{}' is not a single byte", c))
            })?,
            (None, Some("tsv")) => b'\t',
            (None, _) => b',',
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers().map_err(InfrastructureError::Csv)?.clone();
        let header_map = build_header_map(&headers);
        let date_idx = column_index(&header_map, &source.columns.date)?;
        let value_idx = column_index(&header_map, &source.columns.value)?;

        let skip = source.start_row.unwrap_or(0);
        let mut records = Vec::new();
        for result in reader.records().skip(skip) {
            let row = result.map_err(InfrastructureError::Csv)?;
            let date = row.get(date_idx).unwrap_or_default();
            let value = row.get(value_idx).unwrap_or_default();
            // Blank lines and footnote rows carry neither field.
            if date.is_empty() && value.is_empty() {
                continue;
            }
            records.push(RawRecord::from([
                (DATE_KEY.to_string(), date.to_string()),
                (VALUE_KEY.to_string(), value.to_string()),
            ]));
        }

        debug!(count = records.len(), "CSV parsed");
        Ok(records)
    }
}

/// Ordered list of parsers; the first one that supports a file wins.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self {
            parsers: vec![Box::new(CsvReader)],
        }
    }
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    pub fn register(mut self, parser: Box<dyn Parser>) -> Self {
        self.parsers.push(parser);
        self
    }

    pub fn for_path(&self, path: &Path) -> Result<&dyn Parser, InfrastructureError> {
        if let Some(parser) = self.parsers.iter().find(|p| p.supports(path)) {
            return Ok(parser.as_ref());
        }
        let ext = extension(path).unwrap_or_else(|| "<none>".into());
        let detail = if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            format!("{} (spreadsheet files are not parsed)", path.display())
        } else {
            format!("{} (extension '{}')", path.display(), ext)
        };
        Err(InfrastructureError::UnsupportedFormat(detail))
    }
}

impl Parser for ParserRegistry {
    fn supports(&self, path: &Path) -> bool {
        self.parsers.iter().any(|p| p.supports(path))
    }

    fn parse(&self, path: &Path, source: &SourceConfig) -> Result<Vec<RawRecord>, RadarError> {
        self.for_path(path)?.parse(path, source)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn normalize_header_name(name: &str) -> String {
    // UTF-8 exports from spreadsheets often start with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header_name(h), i))
        .collect()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, InfrastructureError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| {
            let mut available: Vec<&str> = header_map.keys().map(String::as_str).collect();
            available.sort();
            InfrastructureError::ConfigError(format!(
                "Column '{}' not found in header (available: {})",
                name,
                available.join(", ")
            ))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ColumnMapping;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn source(delimiter: Option<char>, start_row: Option<usize>) -> SourceConfig {
        SourceConfig {
            kind: "static_url".into(),
            url: "unused".into(),
            sheet: None,
            start_cell: None,
            columns: ColumnMapping {
                date: "Fecha".into(),
                value: "Valor".into(),
            },
            delimiter,
            start_row,
        }
    }

    #[test]
    fn test_parse_semicolon_with_bom() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("reservas.csv");
        fs::write(
            &path,
            "\u{feff}Fecha;Valor;Nota\n2024-01-02;26.123,5;x\n\n2024-01-03;26.200,0;\n",
        )?;

        let records = CsvReader.parse(&path, &source(Some(';'), None))?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][DATE_KEY], "2024-01-02");
        assert_eq!(records[0][VALUE_KEY], "26.123,5");
        Ok(())
    }

    #[test]
    fn test_start_row_skips_leading_records() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ipc.csv");
        fs::write(&path, "fecha,valor\nunits,index\n2024-01,100\n2024-02,104.5\n")?;

        let records = CsvReader.parse(&path, &source(None, Some(1)))?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][DATE_KEY], "2024-01");
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.csv");
        fs::write(&path, "date,amount\n2024-01-01,1\n")?;

        let err = CsvReader.parse(&path, &source(None, None)).unwrap_err();
        assert!(err.to_string().contains("Fecha"));
        Ok(())
    }

    #[test]
    fn test_registry_rejects_spreadsheets() {
        let registry = ParserRegistry::default();
        assert!(registry.supports(Path::new("data/raw/a.CSV")));
        let err = registry.for_path(Path::new("data/raw/a.xlsx")).err().unwrap();
        assert!(matches!(err, InfrastructureError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("spreadsheet"));
        assert!(ParserRegistry::empty().for_path(Path::new("a.csv")).is_err());
    }
}
