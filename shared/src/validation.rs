//! Validation utilities for prediction requests
//!
//! The plain checks return `&'static str` messages so both the HTTP layer and
//! the engine can phrase them; the `validate_*` wrappers used by the engine
//! return [`PredictionError`].

use rust_decimal::Decimal;

use crate::error::{PredictionError, PredictionResult};
use crate::types::GpsCoordinates;

/// Furthest forecast horizon in days
pub const MAX_FORECAST_PERIOD_DAYS: u32 = 90;

/// Most years of history a single request may analyse
pub const MAX_YEARS_OF_HISTORY: u32 = 10;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude is within -90..=90 degrees
pub fn check_latitude(latitude: Decimal) -> Result<(), &'static str> {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within -180..=180 degrees
pub fn check_longitude(longitude: Decimal) -> Result<(), &'static str> {
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

pub fn validate_coordinates(coordinates: &GpsCoordinates) -> PredictionResult<()> {
    check_latitude(coordinates.latitude).map_err(PredictionError::InvalidCoordinates)?;
    check_longitude(coordinates.longitude).map_err(PredictionError::InvalidCoordinates)?;
    Ok(())
}

/// Parse and validate floating point degrees
pub fn coordinates_from_degrees(latitude: f64, longitude: f64) -> PredictionResult<GpsCoordinates> {
    let coordinates = GpsCoordinates::from_degrees(latitude, longitude).ok_or(
        PredictionError::InvalidCoordinates("Latitude and longitude must be finite numbers"),
    )?;
    validate_coordinates(&coordinates)?;
    Ok(coordinates)
}

// ============================================================================
// Vegetation Index Validations
// ============================================================================

/// Validate an NDVI reading is within its physical range of -1..=1
pub fn check_ndvi(ndvi: f64) -> Result<(), &'static str> {
    if !ndvi.is_finite() {
        return Err("NDVI must be a finite number");
    }
    if !(-1.0..=1.0).contains(&ndvi) {
        return Err("NDVI must be between -1 and 1");
    }
    Ok(())
}

pub fn validate_ndvi(ndvi: f64) -> PredictionResult<()> {
    check_ndvi(ndvi).map_err(PredictionError::InvalidNdvi)
}

// ============================================================================
// Forecast Parameter Validations
// ============================================================================

/// Any non-zero span of history; the data quality factor divides by it
pub fn validate_history_span(years: u32) -> PredictionResult<()> {
    if years == 0 {
        return Err(PredictionError::NoHistorySpan);
    }
    Ok(())
}

/// Span accepted from API callers, capped at `MAX_YEARS_OF_HISTORY`
pub fn validate_years_of_history(years: u32) -> PredictionResult<()> {
    if years == 0 || years > MAX_YEARS_OF_HISTORY {
        return Err(PredictionError::InvalidYearsOfHistory {
            requested: years,
            max: MAX_YEARS_OF_HISTORY,
        });
    }
    Ok(())
}

pub fn validate_forecast_period(days: u32) -> PredictionResult<()> {
    if days == 0 || days > MAX_FORECAST_PERIOD_DAYS {
        return Err(PredictionError::InvalidForecastPeriod {
            days,
            max: MAX_FORECAST_PERIOD_DAYS,
        });
    }
    Ok(())
}

/// Interval must lie within `1..=days`
pub fn validate_forecast_interval(interval: u32, days: u32) -> PredictionResult<()> {
    if interval == 0 || interval > days {
        return Err(PredictionError::InvalidInterval { interval, days });
    }
    Ok(())
}
