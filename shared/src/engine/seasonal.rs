//! Seasonal pattern extraction

use crate::models::{MonthlyStats, Observation, SeasonalPattern};

/// Group a series by calendar month and summarise each month.
///
/// Observations without a value are skipped. Months with no observations
/// get [`MonthlyStats::empty`].
pub fn seasonal_pattern(series: &[Observation]) -> SeasonalPattern {
    let mut buckets: [Vec<f64>; 12] = Default::default();

    for observation in series {
        let Some(value) = observation.valid_value() else {
            continue;
        };
        if (1..=12).contains(&observation.month) {
            buckets[(observation.month - 1) as usize].push(value);
        }
    }

    let mut months = [MonthlyStats::empty(); 12];
    for (stats, values) in months.iter_mut().zip(buckets.iter()) {
        *stats = monthly_stats(values);
    }

    SeasonalPattern::from_months(months)
}

fn monthly_stats(values: &[f64]) -> MonthlyStats {
    if values.is_empty() {
        return MonthlyStats::empty();
    }

    let (average, std_dev) = mean_and_std_dev(values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    MonthlyStats {
        average,
        std_dev,
        min,
        max,
        count: values.len(),
    }
}

/// Mean and population standard deviation (divides by n)
pub(crate) fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, value: Option<f64>) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), value)
    }

    #[test]
    fn test_empty_series_yields_twelve_empty_months() {
        let pattern = seasonal_pattern(&[]);
        assert_eq!(pattern.iter().count(), 12);
        for (_, stats) in pattern.iter() {
            assert_eq!(*stats, MonthlyStats::empty());
        }
    }

    #[test]
    fn test_monthly_statistics() {
        let series = vec![
            obs(2022, 3, 1, Some(0.4)),
            obs(2023, 3, 1, Some(0.6)),
            obs(2023, 7, 15, Some(0.8)),
        ];
        let pattern = seasonal_pattern(&series);

        let march = pattern.get(3);
        assert_eq!(march.count, 2);
        assert!((march.average - 0.5).abs() < 1e-12);
        // population std dev of {0.4, 0.6}
        assert!((march.std_dev - 0.1).abs() < 1e-12);
        assert_eq!(march.min, 0.4);
        assert_eq!(march.max, 0.6);

        let july = pattern.get(7);
        assert_eq!(july.count, 1);
        assert_eq!(july.std_dev, 0.0);

        assert!(!pattern.has_signal(1));
    }

    #[test]
    fn test_missing_values_are_excluded() {
        let series = vec![
            obs(2023, 5, 1, None),
            obs(2023, 5, 2, Some(0.3)),
            obs(2023, 5, 3, Some(f64::NAN)),
        ];
        let pattern = seasonal_pattern(&series);
        assert_eq!(pattern.get(5).count, 1);
        assert_eq!(pattern.get(5).average, 0.3);
        assert_eq!(pattern.total_count(), 1);
    }

    #[test]
    fn test_duplicate_dates_are_kept() {
        let series = vec![obs(2023, 9, 10, Some(0.2)), obs(2023, 9, 10, Some(0.4))];
        let pattern = seasonal_pattern(&series);
        assert_eq!(pattern.get(9).count, 2);
        assert!((pattern.get(9).average - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_month_lookup() {
        let pattern = seasonal_pattern(&[obs(2023, 1, 1, Some(0.5))]);
        assert_eq!(pattern.get(0), MonthlyStats::empty());
        assert_eq!(pattern.get(13), MonthlyStats::empty());
    }
}
