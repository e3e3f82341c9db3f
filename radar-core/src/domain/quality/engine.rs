// radar-core/src/domain/quality/engine.rs

use tracing::{debug, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::Cleaner;
use crate::domain::quality::chronological;
use crate::domain::quality::continuity::scan_gaps;
use crate::domain::quality::outliers::outlier_indices;
use crate::domain::quality::profile::{CheckAction, ConfigurationWarning, QualityProfile};
use crate::domain::quality::report::QualityReport;
use crate::domain::quality::sort_chronologically;
use crate::domain::series::Observation;

/// Applies a quality profile to the observations of a single series.
///
/// Stateless: one value can be shared by any number of workers.
///
/// Range, outliers and continuity each look at the same sorted copy of the
/// input, so no check sees the effect of another. The cleaned sequence is
/// that copy minus the union of range violations and outliers (for the checks
/// in `remove` mode). Gaps are reported only.
///
/// With `outliers.iterate`, outlier detection is then repeated on the cleaned
/// sequence until it flags nothing, which makes `clean` a fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityEngine;

impl QualityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(
        &self,
        observations: &[Observation],
        profile: &QualityProfile,
    ) -> Result<(Vec<Observation>, QualityReport), DomainError> {
        validate_batch(observations)?;

        let mut report = QualityReport::default();
        let sorted = sort_chronologically(observations);
        let mut dropped = vec![false; sorted.len()];

        // 1. Range
        if profile.range.enabled {
            match profile.range.bounds() {
                Ok(bounds) => {
                    let flagged: Vec<usize> = sorted
                        .iter()
                        .enumerate()
                        .filter(|(_, o)| bounds.violated_by(o.value))
                        .map(|(i, _)| i)
                        .collect();
                    report.range_violations = pick(&sorted, &flagged);
                    if profile.range.action == CheckAction::Remove {
                        mark(&mut dropped, &flagged);
                    }
                }
                Err(w) => record(&mut report, w),
            }
        }

        // 2. Outliers
        let mut refine = None;
        if profile.outliers.enabled {
            match profile.outliers.settings() {
                Ok(settings) => {
                    let flagged = outlier_indices(&sorted, settings);
                    report.outliers = pick(&sorted, &flagged);
                    if profile.outliers.action == CheckAction::Remove {
                        mark(&mut dropped, &flagged);
                        if profile.outliers.iterate {
                            refine = Some(settings);
                        }
                    }
                }
                Err(w) => record(&mut report, w),
            }
        }

        // 3. Continuity
        if profile.continuity.enabled {
            if let Some(w) = profile.continuity.ambiguity() {
                record(&mut report, w);
            }
            match profile.continuity.threshold() {
                Ok(threshold) => report.gaps = scan_gaps(&sorted, threshold),
                Err(w) => record(&mut report, w),
            }
        }

        let mut cleaned: Vec<Observation> = sorted
            .into_iter()
            .zip(&dropped)
            .filter(|(_, drop)| !**drop)
            .map(|(obs, _)| obs)
            .collect();
        report.removed = dropped.iter().filter(|d| **d).count();

        if let Some(settings) = refine {
            loop {
                let flagged = outlier_indices(&cleaned, settings);
                if flagged.is_empty() {
                    break;
                }
                report.removed += flagged.len();
                report.outliers.extend(take(&mut cleaned, &flagged));
            }
            report.outliers.sort_by(chronological);
        }

        debug!(
            input = observations.len(),
            kept = cleaned.len(),
            gaps = report.gaps.len(),
            outliers = report.outliers.len(),
            range_violations = report.range_violations.len(),
            "Quality checks finished"
        );

        Ok((cleaned, report))
    }
}

impl Cleaner for QualityEngine {
    fn clean(
        &self,
        observations: &[Observation],
        profile: &QualityProfile,
    ) -> Result<(Vec<Observation>, QualityReport), DomainError> {
        QualityEngine::clean(self, observations, profile)
    }
}

/// Rejects the whole batch on the first invalid observation.
fn validate_batch(observations: &[Observation]) -> Result<(), DomainError> {
    let Some(first) = observations.first() else {
        return Ok(());
    };
    for (index, obs) in observations.iter().enumerate() {
        obs.validate(index)?;
        if obs.series_code != first.series_code {
            return Err(DomainError::InvalidObservation {
                index,
                reason: format!(
                    "series code '{}' differs from '{}'; checks run on one series at a time",
                    obs.series_code, first.series_code
                ),
            });
        }
    }
    Ok(())
}

fn record(report: &mut QualityReport, warning: ConfigurationWarning) {
    warn!(check = %warning.check, "{}", warning.message);
    report.warnings.push(warning);
}

fn pick(observations: &[Observation], indices: &[usize]) -> Vec<Observation> {
    indices.iter().map(|&i| observations[i].clone()).collect()
}

fn mark(dropped: &mut [bool], indices: &[usize]) {
    for &i in indices {
        dropped[i] = true;
    }
}

/// Moves the observations at `indices` (ascending) out of `working`.
fn take(working: &mut Vec<Observation>, indices: &[usize]) -> Vec<Observation> {
    let mut taken = Vec::with_capacity(indices.len());
    let mut next = indices.iter().peekable();
    let mut kept = Vec::with_capacity(working.len().saturating_sub(indices.len()));
    for (i, obs) in std::mem::take(working).into_iter().enumerate() {
        if next.peek() == Some(&&i) {
            next.next();
            taken.push(obs);
        } else {
            kept.push(obs);
        }
    }
    *working = kept;
    taken
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod properties {
    use super::*;
    use crate::domain::quality::profile::{ContinuityConfig, OutliersConfig, RangeConfig};
    use chrono::{NaiveDate, TimeDelta};
    use proptest::prelude::*;

    fn observations() -> impl Strategy<Value = Vec<Observation>> {
        prop::collection::vec((0i64..720, -500.0f64..500.0), 0..40).prop_map(|points| {
            let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            points
                .into_iter()
                .map(|(day, value)| Observation::new("PROP", t0 + TimeDelta::days(day), value))
                .collect()
        })
    }

    fn profiles() -> impl Strategy<Value = QualityProfile> {
        (
            any::<bool>(),
            1i64..60,
            any::<bool>(),
            prop_oneof![Just("iqr"), Just("zscore")],
            0.5f64..4.0,
            any::<bool>(),
            any::<bool>(),
            -400.0f64..0.0,
            0.0f64..400.0,
        )
            .prop_map(
                |(gaps_on, max_gap, outliers_on, method, threshold, iterate, range_on, min, max)| {
                    QualityProfile {
                        continuity: ContinuityConfig {
                            enabled: gaps_on,
                            max_gap_days: Some(max_gap),
                            max_gap_months: None,
                        },
                        outliers: OutliersConfig {
                            enabled: outliers_on,
                            method: Some(method.to_string()),
                            threshold: Some(threshold),
                            iterate,
                            ..Default::default()
                        },
                        range: RangeConfig {
                            enabled: range_on,
                            min_value: Some(min),
                            max_value: Some(max),
                            ..Default::default()
                        },
                    }
                },
            )
    }

    proptest! {
        /// Property: with `iterate`, a cleaned sequence has nothing left to remove.
        #[test]
        fn prop_iterated_clean_is_idempotent(obs in observations(), profile in profiles()) {
            let mut profile = profile;
            profile.outliers.iterate = true;
            let (once, _) = QualityEngine.clean(&obs, &profile).unwrap();
            let (twice, report) = QualityEngine.clean(&once, &profile).unwrap();
            prop_assert_eq!(report.outliers.len(), 0);
            prop_assert_eq!(report.range_violations.len(), 0);
            prop_assert_eq!(report.removed, 0);
            prop_assert_eq!(twice, once);
        }

        /// Property: range removal alone is stable, whatever the outlier mode.
        #[test]
        fn prop_second_pass_has_no_range_violations(obs in observations(), profile in profiles()) {
            let (once, _) = QualityEngine.clean(&obs, &profile).unwrap();
            let (_, report) = QualityEngine.clean(&once, &profile).unwrap();
            prop_assert_eq!(report.range_violations.len(), 0);
        }

        /// Property: nothing is lost; every removal is backed by a finding.
        #[test]
        fn prop_removals_are_accounted_for(obs in observations(), profile in profiles()) {
            let (cleaned, report) = QualityEngine.clean(&obs, &profile).unwrap();
            prop_assert_eq!(cleaned.len() + report.removed, obs.len());
            prop_assert!(report.removed <= report.outliers.len() + report.range_violations.len());
        }

        /// Property: only timestamps matter, not the order the caller used.
        #[test]
        fn prop_input_order_is_irrelevant(
            (obs, shuffled) in observations().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
            profile in profiles(),
        ) {
            let a = QualityEngine.clean(&obs, &profile).unwrap();
            let b = QualityEngine.clean(&shuffled, &profile).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: survivors of an enabled range check are within bounds.
        #[test]
        fn prop_cleaned_values_respect_range(obs in observations(), profile in profiles()) {
            let (cleaned, _) = QualityEngine.clean(&obs, &profile).unwrap();
            if profile.range.enabled {
                let min = profile.range.min_value.unwrap();
                let max = profile.range.max_value.unwrap();
                prop_assert!(cleaned.iter().all(|o| min <= o.value && o.value <= max));
            }
        }
    }
}
