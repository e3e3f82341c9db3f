// radar-core/src/domain/quality/range.rs

use crate::domain::quality::profile::{ConfigurationWarning, RangeBounds, RangeConfig};
use crate::domain::series::Observation;

/// Observations strictly outside the configured bounds, in input order.
pub fn check_range(
    observations: &[Observation],
    config: &RangeConfig,
) -> Result<Vec<Observation>, ConfigurationWarning> {
    let bounds = config.bounds()?;
    Ok(observations
        .iter()
        .filter(|o| bounds.violated_by(o.value))
        .cloned()
        .collect())
}

impl RangeBounds {
    /// Values equal to a bound are accepted.
    pub fn violated_by(&self, value: f64) -> bool {
        self.min_value.is_some_and(|min| value < min) || self.max_value.is_some_and(|max| value > max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(values: &[f64]) -> Vec<Observation> {
        let t = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .map(|v| Observation::new("RES", t, *v))
            .collect()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let cfg = RangeConfig {
            enabled: true,
            min_value: Some(0.0),
            max_value: Some(100.0),
            ..Default::default()
        };
        let violations = check_range(&obs(&[0.0, 100.0, -0.5, 100.5, 50.0]), &cfg).unwrap();
        let values: Vec<f64> = violations.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![-0.5, 100.5]);
    }

    #[test]
    fn test_missing_bound_is_unbounded() {
        let cfg = RangeConfig {
            enabled: true,
            min_value: None,
            max_value: Some(10.0),
            ..Default::default()
        };
        let violations = check_range(&obs(&[-1e12, 11.0]), &cfg).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].value, 11.0);
    }

    #[test]
    fn test_inverted_bounds_skip_the_check() {
        let cfg = RangeConfig {
            enabled: true,
            min_value: Some(5.0),
            max_value: Some(1.0),
            ..Default::default()
        };
        assert!(check_range(&obs(&[3.0]), &cfg).is_err());
    }
}
