//! Route definitions for the Bloom Minds prediction server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // NDVI prediction, forecast and historical analysis
        .nest("/ndvi", ndvi_routes())
}

/// NDVI routes
fn ndvi_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/forecast", get(handlers::forecast))
        .route("/analysis", get(handlers::analysis))
}
