//! NDVI prediction and confidence models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Point prediction with an uncertainty band, all within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(rename = "ndvi")]
    pub value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub target_date: NaiveDate,
    pub days_ahead: i64,
}

/// Confidence band of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Map a 0-100 percentage onto its band; lower bounds are inclusive
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80..=u8::MAX => ConfidenceLevel::High,
            60..=79 => ConfidenceLevel::Medium,
            40..=59 => ConfidenceLevel::Low,
            _ => ConfidenceLevel::VeryLow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "very_low",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five normalized sub-factors behind a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactors {
    pub seasonal_stability: f64,
    pub trend_reliability: f64,
    pub data_quality: f64,
    pub temporal_reliability: f64,
    pub variability_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceScore {
    /// 0-100
    pub percentage: u8,
    pub level: ConfidenceLevel,
    pub factors: ConfidenceFactors,
}

/// How the point prediction was assembled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBreakdown {
    pub seasonal_baseline: f64,
    pub trend_adjustment: f64,
    pub historical_mean: f64,
    pub historical_min: f64,
    pub historical_max: f64,
}

/// Complete result of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdviPrediction {
    pub prediction: Prediction,
    pub confidence: ConfidenceScore,
    pub breakdown: PredictionBreakdown,
    pub location: GpsCoordinates,
    pub years_analyzed: u32,
    pub data_points: usize,
}
