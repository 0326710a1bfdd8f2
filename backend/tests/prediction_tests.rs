//! Prediction engine property tests
//!
//! Tests for the historical-trend pipeline including:
//! - Seasonal pattern shape and bucket counts
//! - Prediction band ordering and date range validation
//! - Confidence score range and level thresholds
//! - Forecast date spacing

use bloom_minds_backend::services::MockHistoricalSource;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::engine::{analyze, fit_trend, forecast_dates, predict_ndvi, seasonal_pattern};
use shared::{ConfidenceLevel, GpsCoordinates, HistoricalSource, Observation, PredictionError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn location() -> GpsCoordinates {
    GpsCoordinates::new(Decimal::new(187883, 4), Decimal::new(989853, 4))
}

fn today() -> NaiveDate {
    date(2024, 3, 1)
}

/// Roughly monthly series starting 2020-01-15 with optional gaps
fn series_strategy() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::vec(prop::option::of(0.0f64..1.0), 0..60).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Observation::new(date(2020, 1, 15) + Duration::days(i as i64 * 30), value))
            .collect()
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 36 months of a constant reading
    #[test]
    fn test_constant_series_scenario() {
        let series: Vec<_> = (0..36)
            .map(|i| {
                let year = 2021 + i / 12;
                let month = (i % 12) as u32 + 1;
                Observation::new(date(year, month, 10), Some(0.5))
            })
            .collect();
        let analysis = analyze(location(), &series);

        assert_eq!(analysis.trend.slope, 0.0);
        assert_eq!(analysis.trend.r2, 0.0);
        for (_, stats) in analysis.seasonal_pattern.iter() {
            assert!((stats.average - 0.5).abs() < 1e-12);
            assert_eq!(stats.std_dev, 0.0);
        }

        let prediction = predict_ndvi(&analysis, date(2024, 4, 20), today(), 3).unwrap();
        assert!((prediction.prediction.value - 0.5).abs() < 1e-12);
        assert!((prediction.prediction.lower_bound - 0.5).abs() < 1e-12);
        assert!((prediction.prediction.upper_bound - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_series_scenario() {
        let analysis = analyze(location(), &[]);
        assert_eq!(analysis.seasonal_pattern.total_count(), 0);
        assert_eq!(analysis.trend.slope, 0.0);
        assert_eq!(analysis.trend.intercept, 0.0);

        let prediction = predict_ndvi(&analysis, date(2024, 3, 2), today(), 3).unwrap();
        assert_eq!(prediction.prediction.value, 0.0);
        assert!(matches!(
            predict_ndvi(&analysis, today(), today(), 3),
            Err(PredictionError::TargetNotInFuture { .. })
        ));
    }

    #[test]
    fn test_year_over_year_increase() {
        let series = vec![
            Observation::new(date(2022, 6, 1), Some(0.3)),
            Observation::new(date(2023, 6, 1), Some(0.7)),
        ];
        let trend = fit_trend(&series);
        assert!(trend.slope > 0.0);
        assert!((trend.slope_per_year - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_percentage(80), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percentage(79), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percentage(60), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percentage(59), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percentage(40), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percentage(39), ConfidenceLevel::VeryLow);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every month has a bucket and the buckets account for every valid value
    #[test]
    fn prop_seasonal_pattern_counts(series in series_strategy()) {
        let pattern = seasonal_pattern(&series);
        prop_assert_eq!(pattern.iter().count(), 12);

        let valid = series.iter().filter(|o| o.value.is_some()).count();
        prop_assert_eq!(pattern.total_count(), valid);
    }

    /// Fewer than two valid points yield the flat trend
    #[test]
    fn prop_sparse_series_has_flat_trend(value in prop::option::of(0.0f64..1.0), gaps in 0usize..5) {
        let mut series: Vec<_> = (0..gaps)
            .map(|i| Observation::new(date(2022, 1, 1) + Duration::days(i as i64 * 30), None))
            .collect();
        series.push(Observation::new(date(2023, 1, 1), value));

        let trend = fit_trend(&series);
        prop_assert_eq!(trend.slope, 0.0);
        prop_assert_eq!(trend.intercept, 0.0);
        prop_assert_eq!(trend.r2, 0.0);
    }

    /// `0 <= lower <= value <= upper <= 1` and a score within 0..=100
    #[test]
    fn prop_prediction_band_and_score(series in series_strategy(), days in 1i64..=90, years in 1u32..=10) {
        let analysis = analyze(location(), &series);
        let target = today() + Duration::days(days);
        let result = predict_ndvi(&analysis, target, today(), years).unwrap();

        let p = result.prediction;
        prop_assert!(0.0 <= p.lower_bound);
        prop_assert!(p.lower_bound <= p.value);
        prop_assert!(p.value <= p.upper_bound);
        prop_assert!(p.upper_bound <= 1.0);
        prop_assert_eq!(p.days_ahead, days);

        prop_assert!(result.confidence.percentage <= 100);
        prop_assert_eq!(
            result.confidence.level,
            ConfidenceLevel::from_percentage(result.confidence.percentage)
        );
    }

    /// Targets outside 1..=90 days are rejected
    #[test]
    fn prop_out_of_range_targets_rejected(offset in prop_oneof![-400i64..=0, 91i64..400]) {
        let analysis = analyze(location(), &[]);
        let target = today() + Duration::days(offset);
        prop_assert!(predict_ndvi(&analysis, target, today(), 3).is_err());
    }

    /// Higher percentages never map to a lower level
    #[test]
    fn prop_level_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ConfidenceLevel::from_percentage(low) <= ConfidenceLevel::from_percentage(high));
    }

    /// Forecast dates are `today + k * interval`
    #[test]
    fn prop_forecast_dates_are_evenly_spaced(days in 1u32..=90, interval in 1u32..=90) {
        prop_assume!(interval <= days);
        let dates = forecast_dates(today(), days, interval);
        prop_assert_eq!(dates.len() as u32, days / interval);
        for (k, target) in dates.iter().enumerate() {
            prop_assert_eq!(*target, today() + Duration::days(i64::from(interval) * (k as i64 + 1)));
        }
    }

    /// Mock history is one valid reading per month at any latitude
    #[test]
    fn prop_mock_history_in_range(lat in -90i64..=90, years in 1u32..=10, seed in any::<u64>()) {
        let location = GpsCoordinates::new(Decimal::from(lat), Decimal::ZERO);
        let series = MockHistoricalSource::new(Some(seed))
            .fetch(&location, years, today())
            .unwrap();

        prop_assert_eq!(series.len() as u32, years * 12);
        for observation in &series {
            let value = observation.value.unwrap();
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }
}
