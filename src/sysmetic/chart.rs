//! Period filtering for strategy performance charts.
//!
//! Series points are `(epoch millis, value)` pairs. A period keeps the points
//! dated on or after the reference date minus that many calendar months.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type SeriesPoint = (i64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl ChartPeriod {
    pub const ALL_PERIODS: [ChartPeriod; 5] = [
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::OneYear,
        ChartPeriod::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::OneMonth => "1M",
            ChartPeriod::ThreeMonths => "3M",
            ChartPeriod::SixMonths => "6M",
            ChartPeriod::OneYear => "1Y",
            ChartPeriod::All => "ALL",
        }
    }

    fn months(&self) -> Option<u32> {
        match self {
            ChartPeriod::OneMonth => Some(1),
            ChartPeriod::ThreeMonths => Some(3),
            ChartPeriod::SixMonths => Some(6),
            ChartPeriod::OneYear => Some(12),
            ChartPeriod::All => None,
        }
    }

    /// Earliest date kept for `today`, or `None` when everything is kept.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        let months = self.months()?;
        // Month arithmetic clamps to the last day of shorter months
        Some(
            today
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartPeriod::ALL_PERIODS
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid period '{}' (expected 1M, 3M, 6M, 1Y or ALL)", s))
    }
}

fn point_date(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

/// Points dated on or after the period's cutoff. Unrepresentable timestamps
/// are dropped unless the period keeps everything.
pub fn filter_series(
    points: &[SeriesPoint],
    period: ChartPeriod,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let Some(cutoff) = period.cutoff(today) else {
        return points.to_vec();
    };
    points
        .iter()
        .copied()
        .filter(|(ms, _)| point_date(*ms).is_some_and(|d| d >= cutoff))
        .collect()
}

/// Two series drawn on one chart, e.g. cumulative return and daily P/L.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DualSeries {
    pub primary: Vec<SeriesPoint>,
    pub secondary: Vec<SeriesPoint>,
}

impl DualSeries {
    /// Both series cut to the same period.
    pub fn filtered(&self, period: ChartPeriod, today: NaiveDate) -> DualSeries {
        DualSeries {
            primary: filter_series(&self.primary, period, today),
            secondary: filter_series(&self.secondary, period, today),
        }
    }
}

/// `YYYY-MM-DD` for a point's timestamp.
pub fn format_point_date(ms: i64) -> String {
    point_date(ms)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
