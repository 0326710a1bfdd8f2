//! Statistical summaries derived from a historical series

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-month statistics of the historical series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub average: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl MonthlyStats {
    /// Record for a month without observations.
    ///
    /// The zeros mean "no seasonal signal", not an NDVI of zero.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_signal(&self) -> bool {
        self.count > 0
    }
}

/// Monthly statistics for all twelve calendar months
///
/// Serialized as a map keyed by month number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<u32, MonthlyStats>",
    from = "BTreeMap<u32, MonthlyStats>"
)]
pub struct SeasonalPattern {
    months: [MonthlyStats; 12],
}

impl SeasonalPattern {
    pub fn from_months(months: [MonthlyStats; 12]) -> Self {
        Self { months }
    }

    /// Statistics for a 1-based calendar month.
    ///
    /// Out-of-range months have no signal and yield the empty record.
    pub fn get(&self, month: u32) -> MonthlyStats {
        match month {
            1..=12 => self.months[(month - 1) as usize],
            _ => MonthlyStats::empty(),
        }
    }

    pub fn has_signal(&self, month: u32) -> bool {
        self.get(month).has_signal()
    }

    /// Iterate `(month, stats)` pairs from January to December
    pub fn iter(&self) -> impl Iterator<Item = (u32, &MonthlyStats)> {
        self.months
            .iter()
            .enumerate()
            .map(|(idx, stats)| (idx as u32 + 1, stats))
    }

    /// Total number of observations across all months
    pub fn total_count(&self) -> usize {
        self.months.iter().map(|m| m.count).sum()
    }
}

impl From<SeasonalPattern> for BTreeMap<u32, MonthlyStats> {
    fn from(pattern: SeasonalPattern) -> Self {
        pattern.iter().map(|(month, stats)| (month, *stats)).collect()
    }
}

impl From<BTreeMap<u32, MonthlyStats>> for SeasonalPattern {
    fn from(map: BTreeMap<u32, MonthlyStats>) -> Self {
        let mut months = [MonthlyStats::empty(); 12];
        for (month, stats) in map {
            if (1..=12).contains(&month) {
                months[(month - 1) as usize] = stats;
            }
        }
        Self { months }
    }
}

/// Ordinary least-squares trend of value against days since the first observation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendModel {
    /// NDVI change per day
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    pub slope_per_year: f64,
}

impl TrendModel {
    /// Degenerate model used when a line cannot be fitted
    pub fn flat() -> Self {
        Self::default()
    }
}

/// Whole-series variability statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariabilityStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Coefficient of variation, `std_dev / mean` (0 when the mean is 0)
    pub cv: f64,
    pub count: usize,
}
