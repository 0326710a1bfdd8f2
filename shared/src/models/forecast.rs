//! Multi-date NDVI forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NdviPrediction;
use crate::types::GpsCoordinates;

pub const DEFAULT_FORECAST_DAYS: u32 = 30;
pub const DEFAULT_FORECAST_INTERVAL: u32 = 7;
pub const DEFAULT_YEARS_OF_HISTORY: u32 = 3;

/// Parameters of a forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    /// Total horizon in days
    pub days: u32,
    /// Days between consecutive predictions
    pub interval: u32,
    pub years_of_history: u32,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            days: DEFAULT_FORECAST_DAYS,
            interval: DEFAULT_FORECAST_INTERVAL,
            years_of_history: DEFAULT_YEARS_OF_HISTORY,
        }
    }
}

/// Outcome for a single forecast date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastEntry {
    Predicted(Box<NdviPrediction>),
    #[serde(rename_all = "camelCase")]
    Failed { target_date: NaiveDate, error: String },
}

impl ForecastEntry {
    pub fn target_date(&self) -> NaiveDate {
        match self {
            ForecastEntry::Predicted(p) => p.prediction.target_date,
            ForecastEntry::Failed { target_date, .. } => *target_date,
        }
    }

    pub fn prediction(&self) -> Option<&NdviPrediction> {
        match self {
            ForecastEntry::Predicted(p) => Some(p),
            ForecastEntry::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ForecastEntry::Failed { .. })
    }
}

/// Averages over the successful entries of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub average_ndvi: f64,
    pub average_confidence: u8,
    pub total_predictions: usize,
    pub valid_predictions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub location: GpsCoordinates,
    pub days: u32,
    pub interval: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub entries: Vec<ForecastEntry>,
    pub summary: ForecastSummary,
}
