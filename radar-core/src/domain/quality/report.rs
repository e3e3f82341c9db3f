// radar-core/src/domain/quality/report.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::quality::continuity::Gap;
use crate::domain::quality::profile::{CheckKind, ConfigurationWarning};
use crate::domain::series::Observation;

pub const GAPS_KEY: &str = "gaps";
pub const OUTLIERS_KEY: &str = "outliers";
pub const RANGE_VIOLATIONS_KEY: &str = "range_violations";

/// Outcome of one `clean` call: flagged items per check, plus the warnings of
/// checks that were misconfigured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub gaps: Vec<Gap>,
    pub outliers: Vec<Observation>,
    pub range_violations: Vec<Observation>,
    #[serde(default)]
    pub warnings: Vec<ConfigurationWarning>,
    /// Observations dropped from the cleaned sequence (0 in flag-only mode).
    #[serde(default)]
    pub removed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCounts {
    pub gaps: usize,
    pub outliers: usize,
    pub range_violations: usize,
}

impl QualityReport {
    pub fn counts(&self) -> QualityCounts {
        QualityCounts {
            gaps: self.gaps.len(),
            outliers: self.outliers.len(),
            range_violations: self.range_violations.len(),
        }
    }

    /// Check name -> issue count.
    pub fn summary(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            (GAPS_KEY, self.gaps.len()),
            (OUTLIERS_KEY, self.outliers.len()),
            (RANGE_VIOLATIONS_KEY, self.range_violations.len()),
        ])
    }

    pub fn total_issues(&self) -> usize {
        self.gaps.len() + self.outliers.len() + self.range_violations.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    /// Checks that produced nothing because their configuration was unusable.
    pub fn skipped_checks(&self) -> Vec<CheckKind> {
        let mut kinds: Vec<CheckKind> = self
            .warnings
            .iter()
            .filter(|w| w.skipped)
            .map(|w| w.check)
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}
