//! Historical NDVI observations

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One historical NDVI measurement at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub date: NaiveDate,
    /// Normalized vegetation index in [0, 1]; `None` when the scene was unusable
    #[serde(rename = "ndvi")]
    pub value: Option<f64>,
    /// Calendar month, 1-12
    pub month: u32,
    pub year: i32,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self {
            date,
            value,
            month: date.month(),
            year: date.year(),
        }
    }

    /// Value if present and a finite number
    pub fn valid_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Iterate the usable values of a series in order
pub fn valid_values(series: &[Observation]) -> impl Iterator<Item = f64> + '_ {
    series.iter().filter_map(Observation::valid_value)
}
