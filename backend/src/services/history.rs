//! Synthetic monthly NDVI history
//!
//! Stands in for a satellite archive: one observation per month with a
//! sinusoidal growing season, a latitude offset and uniform noise.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{round_to, GpsCoordinates, HistoricalSource, Observation, PredictionError, PredictionResult};

/// Peak-to-mean amplitude of the seasonal cycle
const SEASONAL_AMPLITUDE: f64 = 0.2;
const SEASONAL_BASELINE: f64 = 0.5;
/// Weight of the latitude term; equator gets the full boost
const LATITUDE_WEIGHT: f64 = 0.2;
const NOISE: f64 = 0.05;
/// Keeps generated dates valid in every month
const LAST_SAFE_DAY: u32 = 28;

#[derive(Debug, Clone, Default)]
pub struct MockHistoricalSource {
    seed: Option<u64>,
}

impl MockHistoricalSource {
    /// `None` draws a fresh series from entropy on every fetch
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Noise-free NDVI for a zero-based month at a latitude
pub fn seasonal_value(month0: u32, latitude: f64) -> f64 {
    let seasonal = (f64::from(month0) / 12.0 * 2.0 * PI - PI / 2.0).sin() * SEASONAL_AMPLITUDE
        + SEASONAL_BASELINE;
    let latitude_term = (latitude.abs() / 90.0 * PI / 2.0).cos() * LATITUDE_WEIGHT;
    seasonal + latitude_term
}

impl HistoricalSource for MockHistoricalSource {
    fn fetch(
        &self,
        location: &GpsCoordinates,
        years_back: u32,
        today: NaiveDate,
    ) -> PredictionResult<Vec<Observation>> {
        let months = i32::try_from(years_back.saturating_mul(12))
            .map_err(|_| PredictionError::HistoricalSource("history window too large".into()))?;
        let latitude = location.latitude_degrees();
        let day = today.day().min(LAST_SAFE_DAY);
        // Months since year 0 for the current month
        let current = today.year() * 12 + today.month0() as i32;
        let mut rng = self.rng();

        let series = (current - months + 1..=current)
            .map(|index| -> PredictionResult<Observation> {
                let year = index.div_euclid(12);
                let month0 = index.rem_euclid(12) as u32;
                let date = NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or_else(|| {
                    PredictionError::HistoricalSource(format!(
                        "cannot build date {}-{:02}-{:02}",
                        year,
                        month0 + 1,
                        day
                    ))
                })?;
                let noise = rng.gen_range(-NOISE..NOISE);
                let value = round_to((seasonal_value(month0, latitude) + noise).clamp(0.0, 1.0), 3);
                Ok(Observation::new(date, Some(value)))
            })
            .collect::<PredictionResult<Vec<_>>>()?;

        tracing::debug!(
            latitude,
            years_back,
            points = series.len(),
            "Generated mock NDVI history"
        );

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn chiang_mai() -> GpsCoordinates {
        GpsCoordinates::new(Decimal::new(187883, 4), Decimal::new(989853, 4))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_observation_per_month_ending_today() {
        let source = MockHistoricalSource::new(Some(7));
        let today = date(2024, 3, 31);
        let series = source.fetch(&chiang_mai(), 3, today).unwrap();

        assert_eq!(series.len(), 36);
        assert_eq!(series.first().unwrap().date, date(2021, 4, 28));
        assert_eq!(series.last().unwrap().date, date(2024, 3, 28));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        for month in 1..=12 {
            assert_eq!(series.iter().filter(|o| o.month == month).count(), 3);
        }
    }

    #[test]
    fn test_values_are_bounded_and_rounded() {
        let source = MockHistoricalSource::new(None);
        let series = source.fetch(&chiang_mai(), 10, date(2024, 6, 15)).unwrap();
        for observation in &series {
            let value = observation.value.unwrap();
            assert!((0.0..=1.0).contains(&value));
            assert!((value * 1000.0 - (value * 1000.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_seed_makes_series_reproducible() {
        let today = date(2024, 6, 15);
        let a = MockHistoricalSource::new(Some(42)).fetch(&chiang_mai(), 3, today).unwrap();
        let b = MockHistoricalSource::new(Some(42)).fetch(&chiang_mai(), 3, today).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seasonal_shape() {
        // Trough in January, peak in July
        assert!(seasonal_value(0, 0.0) < seasonal_value(6, 0.0));
        // Equator sits above the poles
        assert!(seasonal_value(6, 0.0) > seasonal_value(6, 80.0));
        assert!((seasonal_value(0, 90.0) - 0.3).abs() < 1e-9);
    }
}
