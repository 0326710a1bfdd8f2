//! Whole-series variability

use super::seasonal::mean_and_std_dev;
use crate::models::{valid_values, Observation, VariabilityStats};

pub fn variability(series: &[Observation]) -> VariabilityStats {
    let values: Vec<f64> = valid_values(series).collect();
    if values.is_empty() {
        return VariabilityStats::default();
    }

    let (mean, std_dev) = mean_and_std_dev(&values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let cv = if mean != 0.0 { std_dev / mean } else { 0.0 };

    VariabilityStats {
        mean,
        std_dev,
        min,
        max,
        range: max - min,
        cv,
        count: values.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[Option<f64>]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation::new(start + chrono::Duration::days(i as i64 * 16), *v))
            .collect()
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(variability(&[]), VariabilityStats::default());
        assert_eq!(variability(&series(&[None, None])).count, 0);
    }

    #[test]
    fn test_statistics() {
        let stats = variability(&series(&[Some(0.2), None, Some(0.4), Some(0.6)]));
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 0.4).abs() < 1e-12);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.6);
        assert!((stats.range - 0.4).abs() < 1e-12);
        let expected_sd = (0.08f64 / 3.0).sqrt();
        assert!((stats.std_dev - expected_sd).abs() < 1e-12);
        assert!((stats.cv - expected_sd / 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mean_has_zero_cv() {
        let stats = variability(&series(&[Some(0.0), Some(0.0)]));
        assert_eq!(stats.cv, 0.0);
    }
}
