// radar-core/src/domain/series/entities.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::series::Frequency;

/// Identity and metadata of one time series (e.g. "BCRA_RESERVES").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub frequency: Frequency,
    pub provider: String,
}

impl Series {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        frequency: Frequency,
        provider: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::InvalidSeries {
                code,
                reason: "series code cannot be empty".into(),
            });
        }
        Ok(Self {
            code,
            name: name.into(),
            unit: unit.into(),
            frequency,
            provider: provider.into(),
        })
    }
}

/// Lineage of a fetched file. Attached to observations, never required downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub dataset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
}

/// One data point. Timestamps are naive and interpreted as UTC across a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub series_code: String,
    pub timestamp: NaiveDateTime,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl Observation {
    pub fn new(series_code: impl Into<String>, timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            series_code: series_code.into(),
            timestamp,
            value,
            provenance: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Checks the invariants of a single observation. `index` is only used for reporting.
    pub fn validate(&self, index: usize) -> Result<(), DomainError> {
        if !self.value.is_finite() {
            return Err(DomainError::InvalidObservation {
                index,
                reason: format!("value {} is not a finite number", self.value),
            });
        }
        if self.series_code.trim().is_empty() {
            return Err(DomainError::InvalidObservation {
                index,
                reason: "series code is empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jan_first() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_series_creation() {
        let series = Series::new(
            "TEST_SERIES",
            "Test Series",
            "USD",
            Frequency::Daily,
            "TEST_PROVIDER",
        )
        .unwrap();

        assert_eq!(series.code, "TEST_SERIES");
        assert_eq!(series.frequency, Frequency::Daily);
        assert_eq!(series.provider, "TEST_PROVIDER");
    }

    #[test]
    fn test_series_rejects_empty_code() {
        let res = Series::new("  ", "x", "USD", Frequency::Monthly, "BCRA");
        assert!(matches!(res, Err(DomainError::InvalidSeries { .. })));
    }

    #[test]
    fn test_observation_validation() {
        let ok = Observation::new("TEST_SERIES", jan_first(), 100.0);
        assert!(ok.validate(0).is_ok());

        let nan = Observation::new("TEST_SERIES", jan_first(), f64::NAN);
        assert!(matches!(
            nan.validate(3),
            Err(DomainError::InvalidObservation { index: 3, .. })
        ));

        let inf = Observation::new("TEST_SERIES", jan_first(), f64::NEG_INFINITY);
        assert!(inf.validate(0).is_err());
    }

    #[test]
    fn test_observation_json_shape() -> anyhow::Result<()> {
        let obs = Observation::new("IPC", jan_first(), 1.5);
        let json = serde_json::to_value(&obs)?;
        assert_eq!(json["series_code"], "IPC");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00");
        assert!(json.get("provenance").is_none());

        let back: Observation = serde_json::from_value(json)?;
        assert_eq!(back, obs);
        Ok(())
    }
}
