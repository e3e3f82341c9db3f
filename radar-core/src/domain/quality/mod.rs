// radar-core/src/domain/quality/mod.rs

use std::cmp::Ordering;

use crate::domain::series::Observation;

pub mod continuity;
pub mod engine;
pub mod outliers;
pub mod profile;
pub mod range;
pub mod report;

pub use continuity::{check_continuity, Gap};
pub use engine::QualityEngine;
pub use outliers::detect_outliers;
pub use profile::{
    CheckAction, CheckKind, ConfigurationWarning, ContinuityConfig, OutliersConfig,
    QualityProfile, RangeConfig,
};
pub use range::check_range;
pub use report::{QualityCounts, QualityReport};

/// Timestamp first; equal timestamps fall back to the value so the result
/// never depends on input order.
pub(crate) fn chronological(a: &Observation, b: &Observation) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.value.total_cmp(&b.value))
}

pub(crate) fn sort_chronologically(observations: &[Observation]) -> Vec<Observation> {
    let mut sorted = observations.to_vec();
    sorted.sort_by(chronological);
    sorted
}
