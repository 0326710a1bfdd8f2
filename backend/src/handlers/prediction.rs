//! HTTP handlers for NDVI prediction endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::recommendations::{recommend, CropType, RecommendationOptions, Recommendations};
use shared::{
    coordinates_from_degrees, round_to, validate_ndvi, ConfidenceScore, Forecast, ForecastEntry,
    ForecastRequest, GpsCoordinates, HistoricalAnalysis, NdviPrediction, Prediction,
    PredictionBreakdown,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

const NDVI_PLACES: i32 = 3;
const TREND_PLACES: i32 = 4;
const FACTOR_PLACES: i32 = 3;

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Body of `POST /ndvi/predict`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictInput {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub target_date: Option<String>,
    pub years_history: Option<u32>,
    pub crop_type: Option<String>,
    pub current_ndvi: Option<f64>,
    pub include_recommendations: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMetadata {
    pub location: GpsCoordinates,
    pub years_analyzed: u32,
    pub data_points: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub prediction: Prediction,
    pub confidence: ConfidenceScore,
    pub analysis: PredictionBreakdown,
    pub metadata: PredictionMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
}

/// Echo of the request as it was interpreted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub lat: f64,
    pub lon: f64,
    pub target_date: NaiveDate,
    pub years_history: u32,
    pub crop_type: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    pub data: PredictionData,
    pub request_info: RequestInfo,
}

/// Query parameters of `GET /ndvi/forecast`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub days: Option<u32>,
    pub interval: Option<u32>,
    pub years_history: Option<u32>,
}

/// Query parameters of `GET /ndvi/analysis`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub years_history: Option<u32>,
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn parse_target_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::validation("targetDate", "Invalid date format. Use YYYY-MM-DD"))
}

fn require_location(lat: Option<f64>, lon: Option<f64>) -> AppResult<GpsCoordinates> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(coordinates_from_degrees(lat, lon)?),
        _ => Err(AppError::validation(
            "lat, lon",
            "Missing required parameters: lat, lon",
        )),
    }
}

/// Round a prediction for presentation
pub fn rounded(mut p: NdviPrediction) -> NdviPrediction {
    let ndvi = |v: f64| round_to(v, NDVI_PLACES);
    let factor = |v: f64| round_to(v, FACTOR_PLACES);

    p.prediction.value = ndvi(p.prediction.value);
    p.prediction.lower_bound = ndvi(p.prediction.lower_bound);
    p.prediction.upper_bound = ndvi(p.prediction.upper_bound);

    p.breakdown.seasonal_baseline = ndvi(p.breakdown.seasonal_baseline);
    p.breakdown.trend_adjustment = round_to(p.breakdown.trend_adjustment, TREND_PLACES);
    p.breakdown.historical_mean = ndvi(p.breakdown.historical_mean);
    p.breakdown.historical_min = ndvi(p.breakdown.historical_min);
    p.breakdown.historical_max = ndvi(p.breakdown.historical_max);

    let f = &mut p.confidence.factors;
    f.seasonal_stability = factor(f.seasonal_stability);
    f.trend_reliability = factor(f.trend_reliability);
    f.data_quality = factor(f.data_quality);
    f.temporal_reliability = factor(f.temporal_reliability);
    f.variability_score = factor(f.variability_score);
    p
}

fn rounded_forecast(mut forecast: Forecast) -> Forecast {
    forecast.entries = forecast
        .entries
        .into_iter()
        .map(|entry| match entry {
            ForecastEntry::Predicted(p) => ForecastEntry::Predicted(Box::new(rounded(*p))),
            failed => failed,
        })
        .collect();
    forecast.summary.average_ndvi = round_to(forecast.summary.average_ndvi, NDVI_PLACES);
    forecast
}

/// Predict NDVI for one location and date
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PredictInput>,
) -> AppResult<Json<PredictResponse>> {
    let (Some(lat), Some(lon), Some(raw_date)) = (input.lat, input.lon, input.target_date.as_deref())
    else {
        return Err(AppError::validation(
            "lat, lon, targetDate",
            "Missing required parameters: lat, lon, targetDate",
        ));
    };

    let target_date = parse_target_date(raw_date)?;
    let location = coordinates_from_degrees(lat, lon)?;
    if let Some(current) = input.current_ndvi {
        validate_ndvi(current)?;
    }
    let years = input
        .years_history
        .unwrap_or(state.config.prediction.default_years_history);
    let crop_type: CropType = input
        .crop_type
        .as_deref()
        .unwrap_or("general")
        .parse()
        .unwrap_or_default();

    tracing::info!(lat, lon, %target_date, years, crop = %crop_type, "NDVI prediction requested");

    let prediction = rounded(state.predictions.predict(location, target_date, years)?);

    let recommendations = input.include_recommendations.unwrap_or(true).then(|| {
        recommend(
            &prediction,
            &RecommendationOptions {
                crop_type: crop_type.clone(),
                current_ndvi: input.current_ndvi,
            },
        )
    });

    Ok(Json(PredictResponse {
        success: true,
        data: PredictionData {
            prediction: prediction.prediction,
            confidence: prediction.confidence,
            analysis: prediction.breakdown,
            metadata: PredictionMetadata {
                location: prediction.location,
                years_analyzed: prediction.years_analyzed,
                data_points: prediction.data_points,
            },
            recommendations,
        },
        request_info: RequestInfo {
            lat,
            lon,
            target_date,
            years_history: years,
            crop_type: crop_type.to_string(),
            timestamp: Utc::now(),
        },
    }))
}

/// Predict NDVI at evenly spaced future dates
pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ApiResponse<Forecast>>> {
    let location = require_location(query.lat, query.lon)?;
    let defaults = ForecastRequest::default();
    let request = ForecastRequest {
        days: query.days.unwrap_or(defaults.days),
        interval: query.interval.unwrap_or(defaults.interval),
        years_of_history: query
            .years_history
            .unwrap_or(state.config.prediction.default_years_history),
    };

    tracing::info!(
        days = request.days,
        interval = request.interval,
        years = request.years_of_history,
        "NDVI forecast requested"
    );

    let forecast = state.predictions.forecast(location, request)?;
    Ok(ApiResponse::ok(rounded_forecast(forecast)))
}

/// Historical seasonal, trend and variability statistics
pub async fn analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<ApiResponse<HistoricalAnalysis>>> {
    let location = require_location(query.lat, query.lon)?;
    let years = query
        .years_history
        .unwrap_or(state.config.prediction.default_years_history);

    let analysis = state.predictions.analyze(location, years)?;
    Ok(ApiResponse::ok(analysis))
}
