// radar-core/src/infrastructure/adapters/mapping_normalizer.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, instrument};

use crate::domain::series::{Frequency, Observation, Provenance, Series};
use crate::error::RadarError;
use crate::infrastructure::adapters::csv_reader::{DATE_KEY, VALUE_KEY};
use crate::infrastructure::config::DatasetConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::normalizer::Normalizer;
use crate::ports::parser::RawRecord;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

fn re_grouped_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?\d{1,3}(,\d{3})+$").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_grouped_dot() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?\d{1,3}(\.\d{3}){2,}$").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_year_month() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Maps canonical raw records (`date`, `value`) onto domain observations using
/// the `normalize:` section of a dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct MappingNormalizer;

impl Normalizer for MappingNormalizer {
    #[instrument(skip_all, fields(dataset = %dataset.id, records = records.len()))]
    fn normalize(
        &self,
        records: &[RawRecord],
        dataset: &DatasetConfig,
        provenance: Option<&Provenance>,
    ) -> Result<(Series, Vec<Observation>), RadarError> {
        let cfg = &dataset.normalize;
        let frequency: Frequency = cfg.frequency.parse()?;
        let series = Series::new(
            &cfg.internal_series_code,
            &dataset.name,
            &cfg.unit,
            frequency,
            &dataset.provider,
        )?;

        let scale = match cfg.scale {
            Some(s) if !s.is_finite() || s == 0.0 => {
                return Err(InfrastructureError::ConfigError(format!(
                    "Dataset '{}': scale must be a finite non-zero number, got {}",
                    dataset.id, s
                ))
                .into());
            }
            Some(s) => s,
            None => 1.0,
        };

        let mut observations = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let field = |key: &str| {
                record
                    .get(key)
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| InfrastructureError::Normalization {
                        row,
                        reason: format!("missing '{}' field", key),
                    })
            };

            let raw_date = field(DATE_KEY)?;
            let raw_value = field(VALUE_KEY)?;

            let mut timestamp = parse_timestamp(raw_date, cfg.date_format.as_deref()).ok_or_else(|| {
                InfrastructureError::Normalization {
                    row,
                    reason: format!("unparseable date '{}'", raw_date),
                }
            })?;
            if cfg.align_to_period {
                timestamp = frequency.period_start(timestamp);
            }

            let value = parse_number(raw_value)
                .map(|v| v * scale)
                .filter(|v| v.is_finite())
                .ok_or_else(|| InfrastructureError::Normalization {
                    row,
                    reason: format!("unparseable value '{}'", raw_value),
                })?;

            let mut obs = Observation::new(&series.code, timestamp, value);
            if let Some(p) = provenance {
                obs = obs.with_provenance(p.clone());
            }
            observations.push(obs);
        }

        debug!(count = observations.len(), series = %series.code, "Records normalized");
        Ok((series, observations))
    }
}

// --- DATES ---

/// Tries `custom` first, then RFC 3339 (converted to UTC), ISO datetimes,
/// common day-first dates, `YYYY-MM` and bare years.
pub fn parse_timestamp(raw: &str, custom: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Some(fmt) = custom {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if let Some(caps) = re_year_month().captures(raw) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0);
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    None
}

// --- NUMBERS ---

/// Parses numbers as published by statistics offices: `1,234.5`,
/// `1.234,5`, `26,5`, `1.234.567`, with optional spaces and a trailing `%`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\'')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let canonical = match (last_dot, last_comma) {
        // Both present: the rightmost one is the decimal separator.
        (Some(d), Some(c)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) if re_grouped_comma().is_match(&cleaned) => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        (Some(_), None) if re_grouped_dot().is_match(&cleaned) => cleaned.replace('.', ""),
        _ => cleaned,
    };

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}
