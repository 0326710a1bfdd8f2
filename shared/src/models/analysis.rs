//! Historical analysis of a location

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{SeasonalPattern, TrendModel, VariabilityStats};
use crate::types::GpsCoordinates;

/// Span of the analysed series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Number of observations, including those without a value
    pub points: usize,
}

/// Seasonal, trend and variability statistics derived from one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalAnalysis {
    pub location: GpsCoordinates,
    pub data_range: DataRange,
    pub seasonal_pattern: SeasonalPattern,
    pub trend: TrendModel,
    pub variability: VariabilityStats,
}
