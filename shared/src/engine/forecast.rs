//! Forecast orchestration over evenly spaced future dates

use chrono::{Duration, NaiveDate};

use super::predictor::{predict_ndvi, MAX_DAYS_AHEAD};
use crate::error::PredictionResult;
use crate::models::{Forecast, ForecastEntry, ForecastRequest, ForecastSummary, HistoricalAnalysis};
use crate::validation::{validate_forecast_interval, validate_forecast_period, validate_history_span};

/// Longest forecast period in days
pub const MAX_FORECAST_DAYS: u32 = MAX_DAYS_AHEAD as u32;

/// `today + k * interval` for `k = 1..=days / interval`
pub fn forecast_dates(today: NaiveDate, days: u32, interval: u32) -> Vec<NaiveDate> {
    if interval == 0 {
        return Vec::new();
    }
    (1..=days / interval)
        .map(|k| today + Duration::days(i64::from(k * interval)))
        .collect()
}

/// Predict every forecast date against one analysis.
///
/// Invalid parameters fail the whole call. A failure for an individual date
/// is recorded on its entry and left out of the summary.
pub fn generate_forecast(
    analysis: &HistoricalAnalysis,
    request: &ForecastRequest,
    today: NaiveDate,
) -> PredictionResult<Forecast> {
    validate_forecast_period(request.days)?;
    validate_forecast_interval(request.interval, request.days)?;
    validate_history_span(request.years_of_history)?;

    let dates = forecast_dates(today, request.days, request.interval);
    let entries: Vec<ForecastEntry> = dates
        .iter()
        .map(|&target| match predict_ndvi(analysis, target, today, request.years_of_history) {
            Ok(prediction) => ForecastEntry::Predicted(Box::new(prediction)),
            Err(e) => ForecastEntry::Failed {
                target_date: target,
                error: e.to_string(),
            },
        })
        .collect();

    Ok(Forecast {
        location: analysis.location,
        days: request.days,
        interval: request.interval,
        start_date: today,
        end_date: dates.last().copied(),
        summary: summarize(&entries),
        entries,
    })
}

pub fn summarize(entries: &[ForecastEntry]) -> ForecastSummary {
    let valid: Vec<_> = entries.iter().filter_map(ForecastEntry::prediction).collect();

    let (average_ndvi, average_confidence) = if valid.is_empty() {
        (0.0, 0)
    } else {
        let n = valid.len() as f64;
        let ndvi = valid.iter().map(|p| p.prediction.value).sum::<f64>() / n;
        let confidence = valid
            .iter()
            .map(|p| f64::from(p.confidence.percentage))
            .sum::<f64>()
            / n;
        (ndvi, confidence.round() as u8)
    };

    ForecastSummary {
        average_ndvi,
        average_confidence,
        total_predictions: entries.len(),
        valid_predictions: valid.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze;
    use crate::error::PredictionError;
    use crate::models::Observation;
    use crate::types::GpsCoordinates;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn analysis() -> HistoricalAnalysis {
        let series: Vec<_> = (0..24)
            .map(|i| {
                Observation::new(
                    date(2022, 1, 12) + Duration::days(i * 30),
                    Some(0.3 + 0.01 * i as f64),
                )
            })
            .collect();
        analyze(GpsCoordinates::new(Decimal::from(10), Decimal::from(20)), &series)
    }

    #[test]
    fn test_forecast_dates() {
        let today = date(2024, 3, 1);
        assert_eq!(
            forecast_dates(today, 30, 7),
            vec![date(2024, 3, 8), date(2024, 3, 15), date(2024, 3, 22), date(2024, 3, 29)]
        );
        assert_eq!(forecast_dates(today, 90, 90), vec![date(2024, 5, 30)]);
        assert!(forecast_dates(today, 30, 0).is_empty());
    }

    #[test]
    fn test_generate_forecast() {
        let today = date(2024, 3, 1);
        let request = ForecastRequest::default();
        let forecast = generate_forecast(&analysis(), &request, today).unwrap();

        assert_eq!(forecast.entries.len(), 4);
        assert_eq!(forecast.start_date, today);
        assert_eq!(forecast.end_date, Some(date(2024, 3, 29)));
        assert!(forecast.entries.iter().all(|e| !e.is_failed()));
        let targets: Vec<_> = forecast.entries.iter().map(ForecastEntry::target_date).collect();
        assert_eq!(targets, forecast_dates(today, 30, 7));
        assert_eq!(forecast.summary.total_predictions, 4);
        assert_eq!(forecast.summary.valid_predictions, 4);
        assert!(forecast.summary.average_ndvi > 0.0);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        let today = date(2024, 3, 1);
        let too_long = ForecastRequest {
            days: 91,
            ..Default::default()
        };
        assert!(matches!(
            generate_forecast(&analysis(), &too_long, today),
            Err(PredictionError::InvalidForecastPeriod { days: 91, .. })
        ));

        let zero_interval = ForecastRequest {
            interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            generate_forecast(&analysis(), &zero_interval, today),
            Err(PredictionError::InvalidInterval { interval: 0, .. })
        ));

        let wide_interval = ForecastRequest {
            days: 10,
            interval: 11,
            years_of_history: 3,
        };
        assert!(generate_forecast(&analysis(), &wide_interval, today).is_err());
    }

    #[test]
    fn test_years_of_history_only_needs_to_be_positive() {
        let today = date(2024, 3, 1);
        let long_history = ForecastRequest {
            years_of_history: 15,
            ..Default::default()
        };
        let forecast = generate_forecast(&analysis(), &long_history, today).unwrap();
        assert_eq!(forecast.summary.valid_predictions, 4);

        let no_history = ForecastRequest {
            years_of_history: 0,
            ..Default::default()
        };
        assert_eq!(
            generate_forecast(&analysis(), &no_history, today),
            Err(PredictionError::NoHistorySpan)
        );
    }

    #[test]
    fn test_summary_excludes_failed_entries() {
        let today = date(2024, 3, 1);
        let ok = predict_ndvi(&analysis(), date(2024, 3, 8), today, 3).unwrap();
        let entries = vec![
            ForecastEntry::Predicted(Box::new(ok.clone())),
            ForecastEntry::Failed {
                target_date: date(2024, 9, 1),
                error: "out of range".to_string(),
            },
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.total_predictions, 2);
        assert_eq!(summary.valid_predictions, 1);
        assert_eq!(summary.average_ndvi, ok.prediction.value);
        assert_eq!(summary.average_confidence, ok.confidence.percentage);
    }

    #[test]
    fn test_summary_of_only_failures() {
        let entries = vec![ForecastEntry::Failed {
            target_date: date(2024, 9, 1),
            error: "out of range".to_string(),
        }];
        let summary = summarize(&entries);
        assert_eq!(summary.average_ndvi, 0.0);
        assert_eq!(summary.average_confidence, 0);
        assert_eq!(summary.valid_predictions, 0);
    }
}
