//! Confidence scoring
//!
//! Five sub-factors, each in [0, 1], blended with fixed weights. The weights
//! and the stability epsilon are empirical; changing them shifts every score.

use super::predictor::uncertainty_factor;
use crate::models::{
    ConfidenceFactors, ConfidenceLevel, ConfidenceScore, SeasonalPattern, TrendModel,
    VariabilityStats,
};

pub const SEASONAL_WEIGHT: f64 = 0.30;
pub const TREND_WEIGHT: f64 = 0.20;
pub const DATA_QUALITY_WEIGHT: f64 = 0.20;
pub const TEMPORAL_WEIGHT: f64 = 0.20;
pub const VARIABILITY_WEIGHT: f64 = 0.10;

/// Added to the monthly average before dividing in the stability factor
pub const STABILITY_EPSILON: f64 = 0.1;

/// Stability assumed for a month without observations
pub const NO_SIGNAL_STABILITY: f64 = 0.5;

pub const OBSERVATIONS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInputs<'a> {
    pub seasonal_pattern: &'a SeasonalPattern,
    pub trend: &'a TrendModel,
    pub variability: &'a VariabilityStats,
    pub target_month: u32,
    pub days_ahead: i64,
    pub observation_count: usize,
    pub years_of_history: u32,
}

pub fn confidence_factors(inputs: &ConfidenceInputs<'_>) -> ConfidenceFactors {
    let month = inputs.seasonal_pattern.get(inputs.target_month);
    let seasonal_stability = if month.has_signal() {
        unit(1.0 - month.std_dev / (month.average + STABILITY_EPSILON))
    } else {
        NO_SIGNAL_STABILITY
    };

    let expected = inputs.years_of_history as f64 * OBSERVATIONS_PER_YEAR;
    let data_quality = if expected > 0.0 {
        unit(inputs.observation_count as f64 / expected)
    } else {
        0.0
    };

    ConfidenceFactors {
        seasonal_stability,
        trend_reliability: unit(inputs.trend.r2),
        data_quality,
        temporal_reliability: unit(1.0 - uncertainty_factor(inputs.days_ahead)),
        variability_score: unit(1.0 - inputs.variability.cv),
    }
}

pub fn score_confidence(inputs: &ConfidenceInputs<'_>) -> ConfidenceScore {
    let factors = confidence_factors(inputs);
    let blended = factors.seasonal_stability * SEASONAL_WEIGHT
        + factors.trend_reliability * TREND_WEIGHT
        + factors.data_quality * DATA_QUALITY_WEIGHT
        + factors.temporal_reliability * TEMPORAL_WEIGHT
        + factors.variability_score * VARIABILITY_WEIGHT;

    let percentage = (unit(blended) * 100.0).round() as u8;

    ConfidenceScore {
        percentage,
        level: ConfidenceLevel::from_percentage(percentage),
        factors,
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
