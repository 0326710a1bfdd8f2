//! NDVI prediction for a single future date
//!
//! `prediction = seasonal baseline for the target month + slope * days since
//! the first observation`, clamped to [0, 1]. The band widens linearly with
//! the horizon, up to half the historical standard deviation at 90 days.

use chrono::{Datelike, NaiveDate};

use super::confidence::{score_confidence, ConfidenceInputs};
use crate::error::{PredictionError, PredictionResult};
use crate::models::{HistoricalAnalysis, NdviPrediction, Prediction, PredictionBreakdown};
use crate::validation::validate_history_span;

/// Furthest prediction horizon in days
pub const MAX_DAYS_AHEAD: i64 = 90;

/// Share of the historical standard deviation used for the band at full horizon
pub const BAND_SCALE: f64 = 0.5;

pub fn days_ahead(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Check that `target` lies within `1..=MAX_DAYS_AHEAD` days after `today`
/// and return the distance in days.
pub fn validate_target_date(today: NaiveDate, target: NaiveDate) -> PredictionResult<i64> {
    let days = days_ahead(today, target);
    if days < 1 {
        return Err(PredictionError::TargetNotInFuture { target, today });
    }
    if days > MAX_DAYS_AHEAD {
        return Err(PredictionError::BeyondHorizon {
            days_ahead: days,
            max: MAX_DAYS_AHEAD,
        });
    }
    Ok(days)
}

/// 0 for today, rising linearly to 1 at the horizon
pub fn uncertainty_factor(days_ahead: i64) -> f64 {
    (days_ahead as f64 / MAX_DAYS_AHEAD as f64).clamp(0.0, 1.0)
}

/// Predict the NDVI at `target` from a precomputed analysis.
pub fn predict(
    analysis: &HistoricalAnalysis,
    target: NaiveDate,
    today: NaiveDate,
) -> PredictionResult<Prediction> {
    let days = validate_target_date(today, target)?;
    let breakdown = breakdown(analysis, target);
    Ok(band(analysis, &breakdown, target, days))
}

/// Predict, score and explain the NDVI at `target`.
pub fn predict_ndvi(
    analysis: &HistoricalAnalysis,
    target: NaiveDate,
    today: NaiveDate,
    years_of_history: u32,
) -> PredictionResult<NdviPrediction> {
    validate_history_span(years_of_history)?;
    let days = validate_target_date(today, target)?;

    let breakdown = breakdown(analysis, target);
    let prediction = band(analysis, &breakdown, target, days);
    let confidence = score_confidence(&ConfidenceInputs {
        seasonal_pattern: &analysis.seasonal_pattern,
        trend: &analysis.trend,
        variability: &analysis.variability,
        target_month: target.month(),
        days_ahead: days,
        observation_count: analysis.data_range.points,
        years_of_history,
    });

    Ok(NdviPrediction {
        prediction,
        confidence,
        breakdown,
        location: analysis.location,
        years_analyzed: years_of_history,
        data_points: analysis.data_range.points,
    })
}

fn breakdown(analysis: &HistoricalAnalysis, target: NaiveDate) -> PredictionBreakdown {
    // a month without history contributes no baseline
    let seasonal_baseline = analysis.seasonal_pattern.get(target.month()).average;

    let days_from_start = analysis
        .data_range
        .start
        .map(|start| (target - start).num_days() as f64)
        .unwrap_or(0.0);

    PredictionBreakdown {
        seasonal_baseline,
        trend_adjustment: analysis.trend.slope * days_from_start,
        historical_mean: analysis.variability.mean,
        historical_min: analysis.variability.min,
        historical_max: analysis.variability.max,
    }
}

fn band(
    analysis: &HistoricalAnalysis,
    breakdown: &PredictionBreakdown,
    target: NaiveDate,
    days_ahead: i64,
) -> Prediction {
    let value = (breakdown.seasonal_baseline + breakdown.trend_adjustment).clamp(0.0, 1.0);
    let spread = analysis.variability.std_dev * uncertainty_factor(days_ahead) * BAND_SCALE;

    Prediction {
        value,
        lower_bound: (value - spread).clamp(0.0, 1.0),
        upper_bound: (value + spread).clamp(0.0, 1.0),
        target_date: target,
        days_ahead,
    }
}
