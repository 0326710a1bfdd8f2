//! WebAssembly module for Bloom Minds Explorer
//!
//! Provides client-side computation for:
//! - NDVI predictions and forecasts from a locally held history
//! - Historical seasonal analysis
//! - Agronomic recommendations and confidence bands

use chrono::NaiveDate;
use serde::Deserialize;
use shared::engine::{analyze, generate_forecast, predict_ndvi};
use shared::recommendations::{recommend, CropType, RecommendationOptions, VegetationStatus};
use shared::{
    check_ndvi, coordinates_from_degrees, ConfidenceLevel, ForecastRequest, HistoricalAnalysis,
    LandCover, NdviPrediction, Observation,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// One reading as supplied from JavaScript
#[derive(Debug, Deserialize)]
struct HistoryPoint {
    date: NaiveDate,
    #[serde(default)]
    ndvi: Option<f64>,
}

fn parse_history(history_json: &str) -> Result<Vec<Observation>, String> {
    let points: Vec<HistoryPoint> =
        serde_json::from_str(history_json).map_err(|e| format!("Invalid history JSON: {}", e))?;
    let mut series: Vec<_> = points
        .into_iter()
        .map(|p| Observation::new(p.date, p.ndvi))
        .collect();
    series.sort_by_key(|o| o.date);
    Ok(series)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
}

fn load_analysis(history_json: &str, lat: f64, lon: f64) -> Result<HistoricalAnalysis, String> {
    let location = coordinates_from_degrees(lat, lon).map_err(|e| e.to_string())?;
    let series = parse_history(history_json)?;
    Ok(analyze(location, &series))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

/// Today's UTC date from the browser clock
fn js_today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .ok_or_else(|| JsValue::from_str("Invalid system date"))
}

fn predict_from(
    history_json: &str,
    lat: f64,
    lon: f64,
    target_date: &str,
    today: NaiveDate,
    years_history: u32,
) -> Result<String, String> {
    let analysis = load_analysis(history_json, lat, lon)?;
    let target = parse_date(target_date)?;
    let prediction =
        predict_ndvi(&analysis, target, today, years_history).map_err(|e| e.to_string())?;
    to_json(&prediction)
}

fn forecast_from(
    history_json: &str,
    lat: f64,
    lon: f64,
    request: ForecastRequest,
    today: NaiveDate,
) -> Result<String, String> {
    let analysis = load_analysis(history_json, lat, lon)?;
    let forecast = generate_forecast(&analysis, &request, today).map_err(|e| e.to_string())?;
    to_json(&forecast)
}

fn recommend_from(
    prediction_json: &str,
    crop_type: &str,
    current_ndvi: Option<f64>,
) -> Result<String, String> {
    let prediction: NdviPrediction = serde_json::from_str(prediction_json)
        .map_err(|e| format!("Invalid prediction JSON: {}", e))?;
    if let Some(current) = current_ndvi {
        check_ndvi(current)?;
    }
    let options = RecommendationOptions {
        crop_type: crop_type.parse::<CropType>().unwrap_or_default(),
        current_ndvi,
    };
    to_json(&recommend(&prediction, &options))
}

/// Predict NDVI at `target_date` (YYYY-MM-DD) from a JSON array of
/// `{ date, ndvi }` readings
#[wasm_bindgen]
pub fn predict_ndvi_json(
    history_json: &str,
    lat: f64,
    lon: f64,
    target_date: &str,
    years_history: u32,
) -> Result<String, JsValue> {
    let today = js_today()?;
    predict_from(history_json, lat, lon, target_date, today, years_history)
        .map_err(|e| JsValue::from_str(&e))
}

/// Forecast NDVI every `interval` days over the next `days` days
#[wasm_bindgen]
pub fn forecast_ndvi_json(
    history_json: &str,
    lat: f64,
    lon: f64,
    days: u32,
    interval: u32,
    years_history: u32,
) -> Result<String, JsValue> {
    let today = js_today()?;
    let request = ForecastRequest {
        days,
        interval,
        years_of_history: years_history,
    };
    forecast_from(history_json, lat, lon, request, today).map_err(|e| JsValue::from_str(&e))
}

/// Seasonal, trend and variability statistics of a history
#[wasm_bindgen]
pub fn analyze_history_json(history_json: &str, lat: f64, lon: f64) -> Result<String, JsValue> {
    load_analysis(history_json, lat, lon)
        .and_then(|analysis| to_json(&analysis))
        .map_err(|e| JsValue::from_str(&e))
}

/// Recommendations for a prediction previously returned by `predict_ndvi_json`
#[wasm_bindgen]
pub fn recommendations_json(
    prediction_json: &str,
    crop_type: &str,
    current_ndvi: Option<f64>,
) -> Result<String, JsValue> {
    recommend_from(prediction_json, crop_type, current_ndvi).map_err(|e| JsValue::from_str(&e))
}

/// Confidence band for a 0-100 score
#[wasm_bindgen]
pub fn confidence_level(percentage: u8) -> String {
    ConfidenceLevel::from_percentage(percentage).to_string()
}

/// Vegetation band for an NDVI value
#[wasm_bindgen]
pub fn vegetation_status(ndvi: f64) -> String {
    match VegetationStatus::from_ndvi(ndvi) {
        VegetationStatus::Bare => "bare",
        VegetationStatus::Sparse => "sparse",
        VegetationStatus::Moderate => "moderate",
        VegetationStatus::Healthy => "healthy",
        VegetationStatus::VeryHealthy => "very_healthy",
    }
    .to_string()
}

/// Map legend code for an NDVI sample, including water, snow and clouds
#[wasm_bindgen]
pub fn classify_ndvi(ndvi: f64) -> String {
    LandCover::from_ndvi(ndvi).to_string()
}

#[wasm_bindgen]
pub fn land_cover_description(ndvi: f64) -> String {
    LandCover::from_ndvi(ndvi).description().to_string()
}

/// Validate coordinates before sending a request
#[wasm_bindgen]
pub fn validate_location(lat: f64, lon: f64) -> bool {
    coordinates_from_degrees(lat, lon).is_ok()
}
