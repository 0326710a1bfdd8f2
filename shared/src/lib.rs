//! Shared types and prediction engine for Bloom Minds Explorer
//!
//! This crate contains the NDVI models and the historical-trend engine shared
//! between the backend and the browser bindings (via WASM).

pub mod engine;
pub mod error;
pub mod land_cover;
pub mod models;
pub mod recommendations;
pub mod source;
pub mod types;
pub mod validation;

pub use error::*;
pub use land_cover::LandCover;
pub use models::*;
pub use source::{HistoricalSource, StaticSource};
pub use types::*;
pub use validation::*;
