//! Bloom Minds Explorer - NDVI prediction server
//!
//! Serves historical-trend NDVI predictions, forecasts and agronomic
//! recommendations over HTTP.

use std::sync::Arc;

use axum::{routing::get, Router};
use chrono::NaiveDate;
use shared::HistoricalSource;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{MockHistoricalSource, PredictionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictions: PredictionService,
}

impl AppState {
    /// State backed by the synthetic history generator
    pub fn new(config: Config) -> Self {
        let source = Arc::new(MockHistoricalSource::new(config.history.seed));
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn HistoricalSource>) -> Self {
        let predictions = PredictionService::new(source, &config.prediction);
        Self {
            config: Arc::new(config),
            predictions,
        }
    }

    /// Pin the date predictions are made from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.predictions = self.predictions.with_today(today);
        self
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Bloom Minds Explorer NDVI Prediction API v1.0"
}
