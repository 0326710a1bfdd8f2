//! Prediction service: fetches history once per request and runs the engine

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::engine::{analyze, generate_forecast, predict_ndvi, validate_target_date};
use shared::{
    validate_years_of_history, Forecast, ForecastRequest, GpsCoordinates, HistoricalAnalysis,
    HistoricalSource, NdviPrediction, PredictionError, PredictionResult,
};

use crate::config::PredictionConfig;

/// NDVI prediction service
#[derive(Clone)]
pub struct PredictionService {
    source: Arc<dyn HistoricalSource>,
    max_years_history: u32,
    fixed_today: Option<NaiveDate>,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(source: Arc<dyn HistoricalSource>, config: &PredictionConfig) -> Self {
        Self {
            source,
            max_years_history: config.max_years_history,
            fixed_today: None,
        }
    }

    /// Pin "today" instead of reading the UTC clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn check_years(&self, years: u32) -> PredictionResult<()> {
        validate_years_of_history(years)?;
        if years > self.max_years_history {
            return Err(PredictionError::InvalidYearsOfHistory {
                requested: years,
                max: self.max_years_history,
            });
        }
        Ok(())
    }

    fn load_analysis(
        &self,
        location: GpsCoordinates,
        years: u32,
        today: NaiveDate,
    ) -> PredictionResult<HistoricalAnalysis> {
        let series = self.source.fetch(&location, years, today)?;
        Ok(analyze(location, &series))
    }

    /// Predict NDVI at one target date
    pub fn predict(
        &self,
        location: GpsCoordinates,
        target_date: NaiveDate,
        years: u32,
    ) -> PredictionResult<NdviPrediction> {
        let today = self.today();
        self.check_years(years)?;
        // Reject bad dates before touching the source
        validate_target_date(today, target_date)?;

        let analysis = self.load_analysis(location, years, today)?;
        let prediction = predict_ndvi(&analysis, target_date, today, years)?;

        tracing::info!(
            %target_date,
            ndvi = prediction.prediction.value,
            confidence = prediction.confidence.percentage,
            "NDVI prediction generated"
        );
        Ok(prediction)
    }

    /// Predict NDVI at evenly spaced dates from one shared analysis
    pub fn forecast(
        &self,
        location: GpsCoordinates,
        request: ForecastRequest,
    ) -> PredictionResult<Forecast> {
        let today = self.today();
        self.check_years(request.years_of_history)?;
        shared::validate_forecast_period(request.days)?;
        shared::validate_forecast_interval(request.interval, request.days)?;

        let analysis = self.load_analysis(location, request.years_of_history, today)?;
        let forecast = generate_forecast(&analysis, &request, today)?;

        tracing::info!(
            days = request.days,
            interval = request.interval,
            valid = forecast.summary.valid_predictions,
            total = forecast.summary.total_predictions,
            "NDVI forecast generated"
        );
        Ok(forecast)
    }

    /// Seasonal, trend and variability statistics for a location
    pub fn analyze(&self, location: GpsCoordinates, years: u32) -> PredictionResult<HistoricalAnalysis> {
        self.check_years(years)?;
        self.load_analysis(location, years, self.today())
    }
}
