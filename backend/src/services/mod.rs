//! Business logic services for the Bloom Minds prediction server

pub mod history;
pub mod prediction;

pub use history::MockHistoricalSource;
pub use prediction::PredictionService;
