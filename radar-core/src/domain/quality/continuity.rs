// radar-core/src/domain/quality/continuity.rs

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::quality::profile::{ConfigurationWarning, ContinuityConfig, GapThreshold};
use crate::domain::quality::sort_chronologically;
use crate::domain::series::Observation;

/// A hole between two chronologically adjacent observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub preceding: Observation,
    pub following: Observation,
}

impl Gap {
    pub fn elapsed(&self) -> TimeDelta {
        self.following.timestamp - self.preceding.timestamp
    }
}

impl From<Gap> for (Observation, Observation) {
    fn from(gap: Gap) -> Self {
        (gap.preceding, gap.following)
    }
}

/// Finds continuity gaps. Sorts a copy of the input first, so callers may pass
/// observations in any order.
pub fn check_continuity(
    observations: &[Observation],
    config: &ContinuityConfig,
) -> Result<Vec<Gap>, ConfigurationWarning> {
    let threshold = config.threshold()?;
    let sorted = sort_chronologically(observations);
    Ok(scan_gaps(&sorted, threshold))
}

/// Walks consecutive pairs of an already sorted slice.
pub(crate) fn scan_gaps(sorted: &[Observation], threshold: GapThreshold) -> Vec<Gap> {
    sorted
        .windows(2)
        .filter(|pair| exceeds(pair[0].timestamp, pair[1].timestamp, threshold))
        .map(|pair| Gap {
            preceding: pair[0].clone(),
            following: pair[1].clone(),
        })
        .collect()
}

fn exceeds(from: NaiveDateTime, to: NaiveDateTime, threshold: GapThreshold) -> bool {
    match threshold {
        GapThreshold::Days(days) => match TimeDelta::try_days(days) {
            Some(limit) => (to - from) > limit,
            None => false,
        },
        GapThreshold::Months(months) => match add_calendar_months(from, months) {
            Some(limit) => to > limit,
            None => false,
        },
    }
}

/// Calendar month addition. Day-of-month clamps (Jan 31 + 1 = Feb 29), and a
/// month-end date stays anchored to month end (Feb 29 + 1 = Mar 31).
fn add_calendar_months(from: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let shifted = from.checked_add_months(Months::new(months))?;
    if !is_month_end(from.date()) {
        return Some(shifted);
    }
    let last_day = end_of_month(shifted.date())?;
    Some(last_day.and_time(from.time()))
}

fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    first
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs_on(date: NaiveDate, value: f64) -> Observation {
        Observation::new("TEST", date.and_hms_opt(0, 0, 0).unwrap(), value)
    }

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_config(n: i64) -> ContinuityConfig {
        ContinuityConfig {
            enabled: true,
            max_gap_days: Some(n),
            max_gap_months: None,
        }
    }

    fn months_config(n: i64) -> ContinuityConfig {
        ContinuityConfig {
            enabled: true,
            max_gap_days: None,
            max_gap_months: Some(n),
        }
    }

    #[test]
    fn test_single_gap_between_day_5_and_day_40() {
        let observations = vec![
            obs_on(day(0), 1.0),
            obs_on(day(5), 2.0),
            obs_on(day(40), 3.0),
        ];
        let gaps = check_continuity(&observations, &days_config(10)).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].preceding.timestamp.date(), day(5));
        assert_eq!(gaps[0].following.timestamp.date(), day(40));
        assert_eq!(gaps[0].elapsed(), TimeDelta::days(35));
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let observations = vec![
            obs_on(day(40), 3.0),
            obs_on(day(0), 1.0),
            obs_on(day(5), 2.0),
        ];
        let gaps = check_continuity(&observations, &days_config(10)).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].preceding.value, 2.0);
        assert_eq!(gaps[0].following.value, 3.0);
    }

    #[test]
    fn test_exact_threshold_is_not_a_gap() {
        let observations = vec![obs_on(day(0), 1.0), obs_on(day(10), 2.0)];
        assert!(check_continuity(&observations, &days_config(10))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_or_one_observation() {
        assert!(check_continuity(&[], &days_config(1)).unwrap().is_empty());
        assert!(check_continuity(&[obs_on(day(0), 1.0)], &days_config(1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_month_end_series_has_no_false_positives() {
        // Month-end observations: 31 -> 29 -> 31 -> 30 days apart.
        let observations = vec![
            obs_on(ymd(2024, 1, 31), 1.0),
            obs_on(ymd(2024, 2, 29), 1.0),
            obs_on(ymd(2024, 3, 31), 1.0),
            obs_on(ymd(2024, 4, 30), 1.0),
        ];
        assert!(check_continuity(&observations, &months_config(1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_month_is_a_gap() {
        let observations = vec![
            obs_on(ymd(2024, 1, 1), 1.0),
            obs_on(ymd(2024, 2, 1), 1.0),
            obs_on(ymd(2024, 4, 1), 1.0),
        ];
        let gaps = check_continuity(&observations, &months_config(1)).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].preceding.timestamp.date(), ymd(2024, 2, 1));

        // A two-month allowance tolerates it.
        assert!(check_continuity(&observations, &months_config(2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_misconfigured_check_returns_warning() {
        let cfg = ContinuityConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(check_continuity(&[obs_on(day(0), 1.0)], &cfg).is_err());
    }
}
