// radar-core/src/domain/quality/outliers.rs

use crate::domain::quality::profile::{
    ConfigurationWarning, OutlierMethod, OutlierSettings, OutliersConfig,
};
use crate::domain::series::Observation;

/// IQR needs at least this many points to say anything.
pub const IQR_MIN_POINTS: usize = 4;
/// Sample standard deviation needs two points.
pub const ZSCORE_MIN_POINTS: usize = 2;

/// Returns the observations classified as outliers, in input order.
pub fn detect_outliers(
    observations: &[Observation],
    config: &OutliersConfig,
) -> Result<Vec<Observation>, ConfigurationWarning> {
    let settings = config.settings()?;
    Ok(outlier_indices(observations, settings)
        .into_iter()
        .map(|i| observations[i].clone())
        .collect())
}

/// Indices (ascending) of outliers for already-resolved settings.
pub(crate) fn outlier_indices(observations: &[Observation], settings: OutlierSettings) -> Vec<usize> {
    let values: Vec<f64> = observations.iter().map(|o| o.value).collect();
    let fences = match settings.method {
        OutlierMethod::Iqr => iqr_fences(&values, settings.threshold),
        OutlierMethod::ZScore => return zscore_indices(&values, settings.threshold),
    };

    match fences {
        Some((lower, upper)) => values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < lower || **v > upper)
            .map(|(i, _)| i)
            .collect(),
        None => Vec::new(),
    }
}

// --- IQR ---

fn iqr_fences(values: &[f64], threshold: f64) -> Option<(f64, f64)> {
    if values.len() < IQR_MIN_POINTS {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - threshold * iqr, q3 + threshold * iqr))
}

/// Linear interpolation between order statistics (position `p * (n - 1)`).
/// `sorted` must be ascending.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

// --- Z-SCORE ---

/// Welford accumulator (mean + sum of squared deviations).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    pub count: u64,
    pub mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn from_values(values: &[f64]) -> Self {
        let mut stats = Self::default();
        for v in values {
            stats.push(*v);
        }
        stats
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        // M2_new = M2_old + (x - old_mean) * (x - new_mean)
        self.m2 += delta * (value - self.mean);
    }

    /// Sample standard deviation (n - 1). `None` below two points.
    pub fn sample_stddev(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some((self.m2 / (self.count - 1) as f64).sqrt())
    }
}

fn zscore_indices(values: &[f64], threshold: f64) -> Vec<usize> {
    if values.len() < ZSCORE_MIN_POINTS {
        return Vec::new();
    }
    let stats = RunningStats::from_values(values);
    let stddev = match stats.sample_stddev() {
        // Relative to the mean so that tiny-valued series are still checked.
        Some(s) if s > 0.0 && s > f64::EPSILON * stats.mean.abs() => s,
        _ => return Vec::new(),
    };

    values
        .iter()
        .enumerate()
        .filter(|(_, v)| ((**v - stats.mean) / stddev).abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}
