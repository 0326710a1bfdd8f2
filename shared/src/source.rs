//! Historical data source seam

use chrono::NaiveDate;

use crate::error::PredictionResult;
use crate::models::Observation;
use crate::types::GpsCoordinates;

/// Supplies the historical NDVI series for a location.
///
/// Implementations must return observations sorted ascending by date and
/// covering roughly `years_back` years up to `today`. Empty or short series
/// are acceptable; the engine degrades to zero statistics.
pub trait HistoricalSource: Send + Sync {
    fn fetch(
        &self,
        location: &GpsCoordinates,
        years_back: u32,
        today: NaiveDate,
    ) -> PredictionResult<Vec<Observation>>;
}

/// Fixed series, regardless of location or window
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    series: Vec<Observation>,
}

impl StaticSource {
    pub fn new(mut series: Vec<Observation>) -> Self {
        series.sort_by_key(|o| o.date);
        Self { series }
    }
}

impl HistoricalSource for StaticSource {
    fn fetch(
        &self,
        _location: &GpsCoordinates,
        _years_back: u32,
        _today: NaiveDate,
    ) -> PredictionResult<Vec<Observation>> {
        Ok(self.series.clone())
    }
}
