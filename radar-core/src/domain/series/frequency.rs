// radar-core/src/domain/series/frequency.rs

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// Sampling frequency of a series. Closed set: anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Start of the period containing `ts` (midnight, Monday, 1st of month/quarter/year).
    pub fn period_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let date = ts.date();
        let start = match self {
            Self::Daily => date,
            Self::Weekly => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Self::Monthly => date.with_day(1).unwrap_or(date),
            Self::Quarterly => {
                let first_month = (date.month0() / 3) * 3 + 1;
                date.with_day(1)
                    .and_then(|d| d.with_month(first_month))
                    .unwrap_or(date)
            }
            Self::Annual => date.with_day(1).and_then(|d| d.with_month(1)).unwrap_or(date),
        };
        start.and_time(NaiveTime::MIN)
    }

    /// True when `ts` already sits on a period boundary.
    pub fn is_aligned(&self, ts: NaiveDateTime) -> bool {
        self.period_start(ts) == ts
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Self::Daily),
            "weekly" | "w" => Ok(Self::Weekly),
            "monthly" | "m" => Ok(Self::Monthly),
            "quarterly" | "q" => Ok(Self::Quarterly),
            "annual" | "yearly" | "a" | "y" => Ok(Self::Annual),
            _ => Err(DomainError::UnknownFrequency(s.to_string())),
        }
    }
}
