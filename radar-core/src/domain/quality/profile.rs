// radar-core/src/domain/quality/profile.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold used when an outlier config does not specify one.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

// =============================================================================
//  1. PROFILE (as read from quality.yml)
// =============================================================================

/// Named bundle of check configurations. Every sub-config is optional in YAML
/// and defaults to disabled.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct QualityProfile {
    #[serde(default)]
    pub continuity: ContinuityConfig,
    #[serde(default)]
    pub outliers: OutliersConfig,
    #[serde(default)]
    pub range: RangeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ContinuityConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_months: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OutliersConfig {
    #[serde(default)]
    pub enabled: bool,
    // Kept as a string so an unknown method degrades to a warning instead of a YAML error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub action: CheckAction,
    /// Remove mode only: after the first pass, keep re-detecting on the
    /// cleaned sequence until nothing more is flagged.
    #[serde(default)]
    pub iterate: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RangeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub action: CheckAction,
}

/// What `clean` does with flagged observations.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckAction {
    #[default]
    Remove,
    Flag,
}

// =============================================================================
//  2. RESOLVED SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapThreshold {
    Days(i64),
    Months(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierMethod {
    Iqr,
    ZScore,
}

impl std::str::FromStr for OutlierMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z-score" | "z_score" => Ok(Self::ZScore),
            _ => Err(format!("Unknown outlier method: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierSettings {
    pub method: OutlierMethod,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

// =============================================================================
//  3. CONFIGURATION WARNINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Continuity,
    Outliers,
    Range,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Continuity => "continuity",
            Self::Outliers => "outliers",
            Self::Range => "range",
        };
        write!(f, "{}", s)
    }
}

/// Non-fatal configuration problem. `skipped` tells whether the check produced
/// no findings because of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationWarning {
    pub check: CheckKind,
    pub message: String,
    pub skipped: bool,
}

impl ConfigurationWarning {
    pub fn skipped(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            skipped: true,
        }
    }

    pub fn notice(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            skipped: false,
        }
    }
}

impl fmt::Display for ConfigurationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped {
            write!(f, "[{}] {} (check skipped)", self.check, self.message)
        } else {
            write!(f, "[{}] {}", self.check, self.message)
        }
    }
}

// =============================================================================
//  4. RESOLUTION (config -> settings | warning)
// =============================================================================

impl ContinuityConfig {
    /// `max_gap_days` wins when both bounds are set.
    pub fn threshold(&self) -> Result<GapThreshold, ConfigurationWarning> {
        match (self.max_gap_days, self.max_gap_months) {
            (Some(days), _) if days <= 0 => Err(ConfigurationWarning::skipped(
                CheckKind::Continuity,
                format!("max_gap_days must be positive, got {}", days),
            )),
            (Some(days), _) => Ok(GapThreshold::Days(days)),
            (None, Some(months)) => match u32::try_from(months) {
                Ok(m) if m > 0 => Ok(GapThreshold::Months(m)),
                _ => Err(ConfigurationWarning::skipped(
                    CheckKind::Continuity,
                    format!("max_gap_months must be positive, got {}", months),
                )),
            },
            (None, None) => Err(ConfigurationWarning::skipped(
                CheckKind::Continuity,
                "neither max_gap_days nor max_gap_months is set",
            )),
        }
    }

    /// Warning emitted when both bounds are configured.
    pub fn ambiguity(&self) -> Option<ConfigurationWarning> {
        match (self.max_gap_days, self.max_gap_months) {
            (Some(days), Some(months)) => Some(ConfigurationWarning::notice(
                CheckKind::Continuity,
                format!(
                    "both max_gap_days ({}) and max_gap_months ({}) are set; using max_gap_days",
                    days, months
                ),
            )),
            _ => None,
        }
    }
}

impl OutliersConfig {
    pub fn settings(&self) -> Result<OutlierSettings, ConfigurationWarning> {
        let method = match self.method.as_deref() {
            None => OutlierMethod::Iqr,
            Some(raw) => raw
                .parse::<OutlierMethod>()
                .map_err(|e| ConfigurationWarning::skipped(CheckKind::Outliers, e))?,
        };

        let threshold = self.threshold.unwrap_or(DEFAULT_THRESHOLD);
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigurationWarning::skipped(
                CheckKind::Outliers,
                format!("threshold must be a positive number, got {}", threshold),
            ));
        }

        Ok(OutlierSettings { method, threshold })
    }
}

impl RangeConfig {
    pub fn bounds(&self) -> Result<RangeBounds, ConfigurationWarning> {
        let invalid = |name: &str, v: f64| {
            ConfigurationWarning::skipped(
                CheckKind::Range,
                format!("{} must be a finite number, got {}", name, v),
            )
        };

        if let Some(min) = self.min_value.filter(|v| !v.is_finite()) {
            return Err(invalid("min_value", min));
        }
        if let Some(max) = self.max_value.filter(|v| !v.is_finite()) {
            return Err(invalid("max_value", max));
        }

        match (self.min_value, self.max_value) {
            (None, None) => Err(ConfigurationWarning::skipped(
                CheckKind::Range,
                "neither min_value nor max_value is set",
            )),
            (Some(min), Some(max)) if min > max => Err(ConfigurationWarning::skipped(
                CheckKind::Range,
                format!("min_value ({}) is greater than max_value ({})", min, max),
            )),
            (min_value, max_value) => Ok(RangeBounds {
                min_value,
                max_value,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_yaml_defaults() -> anyhow::Result<()> {
        let yaml = r#"
continuity:
  enabled: true
  max_gap_months: 2
outliers:
  enabled: true
  method: zscore
"#;
        let profile: QualityProfile = serde_yaml::from_str(yaml)?;
        assert_eq!(profile.continuity.threshold(), Ok(GapThreshold::Months(2)));
        let settings = profile.outliers.settings().unwrap();
        assert_eq!(settings.method, OutlierMethod::ZScore);
        assert_eq!(settings.threshold, DEFAULT_THRESHOLD);
        assert_eq!(profile.outliers.action, CheckAction::Remove);
        assert!(!profile.outliers.iterate);
        assert!(!profile.range.enabled);
        Ok(())
    }

    #[test]
    fn test_days_take_precedence_over_months() {
        let cfg = ContinuityConfig {
            enabled: true,
            max_gap_days: Some(10),
            max_gap_months: Some(1),
        };
        assert_eq!(cfg.threshold(), Ok(GapThreshold::Days(10)));
        let warning = cfg.ambiguity().unwrap();
        assert!(!warning.skipped);
        assert_eq!(warning.check, CheckKind::Continuity);
    }

    #[test]
    fn test_invalid_gap_bounds_are_skipped() {
        let negative = ContinuityConfig {
            enabled: true,
            max_gap_days: Some(-3),
            max_gap_months: None,
        };
        assert!(negative.threshold().unwrap_err().skipped);

        let none = ContinuityConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(none.threshold().is_err());
    }

    #[test]
    fn test_unknown_method_and_bad_threshold() {
        let unknown = OutliersConfig {
            enabled: true,
            method: Some("mad".into()),
            ..Default::default()
        };
        let w = unknown.settings().unwrap_err();
        assert_eq!(w.check, CheckKind::Outliers);
        assert!(w.message.contains("mad"));

        let negative = OutliersConfig {
            enabled: true,
            method: Some("iqr".into()),
            threshold: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.settings().is_err());
    }

    #[test]
    fn test_range_bounds_resolution() {
        let inverted = RangeConfig {
            enabled: true,
            min_value: Some(10.0),
            max_value: Some(1.0),
            ..Default::default()
        };
        assert!(inverted.bounds().is_err());

        let half_open = RangeConfig {
            enabled: true,
            min_value: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            half_open.bounds(),
            Ok(RangeBounds {
                min_value: Some(0.0),
                max_value: None
            })
        );
    }
}
