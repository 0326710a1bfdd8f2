//! Errors raised by the prediction engine
//!
//! Only invalid input is an error. Sparse or degenerate history produces
//! zero-valued statistics and a lower confidence score instead.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Target date must be in the future (target {target}, today {today})")]
    TargetNotInFuture { target: NaiveDate, today: NaiveDate },

    #[error("Predictions are only available up to {max} days in advance (requested {days_ahead})")]
    BeyondHorizon { days_ahead: i64, max: i64 },

    #[error("Forecast period must be between 1 and {max} days (requested {days})")]
    InvalidForecastPeriod { days: u32, max: u32 },

    #[error("Interval must be between 1 and the forecast period of {days} days (requested {interval})")]
    InvalidInterval { interval: u32, days: u32 },

    #[error("Years of history must be between 1 and {max} (requested {requested})")]
    InvalidYearsOfHistory { requested: u32, max: u32 },

    #[error("Years of history must be at least 1")]
    NoHistorySpan,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),

    #[error("Invalid NDVI value: {0}")]
    InvalidNdvi(&'static str),

    #[error("Historical data source error: {0}")]
    HistoricalSource(String),
}

impl PredictionError {
    /// Whether the error was caused by caller input rather than a collaborator
    pub fn is_input_error(&self) -> bool {
        !matches!(self, PredictionError::HistoricalSource(_))
    }
}

pub type PredictionResult<T> = Result<T, PredictionError>;
