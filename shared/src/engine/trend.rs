//! Linear trend estimation

use crate::models::{Observation, TrendModel};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fit `value = slope * days + intercept` by ordinary least squares.
///
/// `days` counts whole days since the first observation of the series, which
/// must already be sorted by date. Fewer than two usable values give
/// [`TrendModel::flat`].
pub fn fit_trend(series: &[Observation]) -> TrendModel {
    let Some(first) = series.first() else {
        return TrendModel::flat();
    };
    let origin = first.date;

    let points: Vec<(f64, f64)> = series
        .iter()
        .filter_map(|o| {
            o.valid_value()
                .map(|y| ((o.date - origin).num_days() as f64, y))
        })
        .collect();

    if points.len() < 2 {
        return TrendModel::flat();
    }

    let n = points.len() as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut ss_total = 0.0;
    for (x, y) in &points {
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean).powi(2);
        ss_total += (y - y_mean).powi(2);
    }

    let slope = if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    };
    let intercept = y_mean - slope * x_mean;

    let ss_residual: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();

    let r2 = if ss_total != 0.0 {
        1.0 - ss_residual / ss_total
    } else {
        0.0
    };

    TrendModel {
        slope,
        intercept,
        r2,
        slope_per_year: slope * DAYS_PER_YEAR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fewer_than_two_points_is_flat() {
        assert_eq!(fit_trend(&[]), TrendModel::flat());
        assert_eq!(
            fit_trend(&[Observation::new(date(2023, 1, 1), Some(0.4))]),
            TrendModel::flat()
        );
        // two observations but only one usable value
        let series = vec![
            Observation::new(date(2023, 1, 1), Some(0.4)),
            Observation::new(date(2023, 2, 1), None),
        ];
        assert_eq!(fit_trend(&series), TrendModel::flat());
    }

    #[test]
    fn test_positive_trend_one_year_apart() {
        let series = vec![
            Observation::new(date(2022, 6, 1), Some(0.3)),
            Observation::new(date(2023, 6, 1), Some(0.7)),
        ];
        let trend = fit_trend(&series);
        assert!(trend.slope > 0.0);
        assert!((trend.slope_per_year - 0.4).abs() < 1e-9);
        assert!((trend.intercept - 0.3).abs() < 1e-9);
        assert!((trend.r2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_series_has_zero_r2() {
        let start = date(2021, 1, 15);
        let series: Vec<_> = (0..36)
            .map(|i| Observation::new(start + Duration::days(30 * i), Some(0.5)))
            .collect();
        let trend = fit_trend(&series);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.r2, 0.0);
        assert!((trend.intercept - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_same_day_observations_have_zero_slope() {
        let day = date(2023, 4, 4);
        let series = vec![
            Observation::new(day, Some(0.2)),
            Observation::new(day, Some(0.6)),
        ];
        let trend = fit_trend(&series);
        assert_eq!(trend.slope, 0.0);
        assert!((trend.intercept - 0.4).abs() < 1e-12);
        // the flat line explains none of the variance
        assert_eq!(trend.r2, 0.0);
    }

    #[test]
    fn test_offsets_measured_from_first_observation_even_without_value() {
        let series = vec![
            Observation::new(date(2023, 1, 1), None),
            Observation::new(date(2023, 1, 11), Some(0.2)),
            Observation::new(date(2023, 1, 21), Some(0.4)),
        ];
        let trend = fit_trend(&series);
        assert!((trend.slope - 0.02).abs() < 1e-12);
        // line passes through (10, 0.2)
        assert!((trend.intercept - 0.0).abs() < 1e-12);
    }
}
