//! Error handling for the Bloom Minds prediction server
//!
//! Every failure is rendered as `{ "success": false, "error": { ... } }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::PredictionError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request validation errors raised at the HTTP boundary
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Engine and historical source errors
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: String, field: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message,
            field: field.map(str::to_string),
        }
    }
}

fn prediction_error_detail(error: &PredictionError) -> (StatusCode, ErrorDetail) {
    let (code, field) = match error {
        PredictionError::TargetNotInFuture { .. } => ("TARGET_NOT_IN_FUTURE", Some("targetDate")),
        PredictionError::BeyondHorizon { .. } => ("BEYOND_PREDICTION_HORIZON", Some("targetDate")),
        PredictionError::InvalidForecastPeriod { .. } => ("INVALID_FORECAST_PERIOD", Some("days")),
        PredictionError::InvalidInterval { .. } => ("INVALID_INTERVAL", Some("interval")),
        PredictionError::InvalidYearsOfHistory { .. } | PredictionError::NoHistorySpan => {
            ("INVALID_YEARS_OF_HISTORY", Some("yearsHistory"))
        }
        PredictionError::InvalidCoordinates(_) => ("INVALID_COORDINATES", None),
        PredictionError::InvalidNdvi(_) => ("INVALID_NDVI", Some("currentNdvi")),
        PredictionError::HistoricalSource(_) => ("HISTORICAL_SOURCE_ERROR", None),
    };

    // Upstream details stay in the logs
    if error.is_input_error() {
        (StatusCode::BAD_REQUEST, ErrorDetail::new(code, error.to_string(), field))
    } else {
        (
            StatusCode::BAD_GATEWAY,
            ErrorDetail::new(
                code,
                "Historical NDVI data is temporarily unavailable".to_string(),
                field,
            ),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", message.clone(), Some(field.as_str())),
            ),
            AppError::Prediction(error) => prediction_error_detail(error),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
