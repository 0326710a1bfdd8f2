//! HTTP handlers

pub mod health;
pub mod prediction;

pub use health::health_check;
pub use prediction::{analysis, forecast, predict};
