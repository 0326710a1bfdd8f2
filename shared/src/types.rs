//! Common types used across the platform

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates of the analysed location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    #[serde(with = "rust_decimal::serde::float")]
    pub latitude: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build coordinates from floating point degrees.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Option<Self> {
        Some(Self {
            latitude: Decimal::from_f64_retain(latitude)?,
            longitude: Decimal::from_f64_retain(longitude)?,
        })
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_f64().unwrap_or(0.0)
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_f64().unwrap_or(0.0)
    }
}

/// Round to a fixed number of decimal places for presentation
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_degrees_rejects_non_finite() {
        assert!(GpsCoordinates::from_degrees(f64::NAN, 10.0).is_none());
        assert!(GpsCoordinates::from_degrees(10.0, f64::INFINITY).is_none());
        let coords = GpsCoordinates::from_degrees(18.5, -98.25).unwrap();
        assert!((coords.latitude_degrees() - 18.5).abs() < 1e-9);
        assert!((coords.longitude_degrees() + 98.25).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(0.1235, 2), 0.12);
        assert_eq!(round_to(-0.00004, 4), -0.0);
    }
}
