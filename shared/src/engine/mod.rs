//! NDVI historical-trend prediction engine
//!
//! Pure, synchronous functions over an in-memory series. Nothing here reads a
//! clock or a random source: "today" is always passed in.

pub mod analysis;
pub mod confidence;
pub mod forecast;
pub mod predictor;
pub mod seasonal;
pub mod trend;
pub mod variability;

pub use analysis::analyze;
pub use confidence::{score_confidence, ConfidenceInputs};
pub use forecast::{forecast_dates, generate_forecast, MAX_FORECAST_DAYS};
pub use predictor::{predict, predict_ndvi, uncertainty_factor, validate_target_date, MAX_DAYS_AHEAD};
pub use seasonal::seasonal_pattern;
pub use trend::fit_trend;
pub use variability::variability;
