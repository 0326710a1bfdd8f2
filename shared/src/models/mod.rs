//! Domain models for the NDVI prediction engine

mod analysis;
mod forecast;
mod observation;
mod prediction;
mod statistics;

pub use analysis::*;
pub use forecast::*;
pub use observation::*;
pub use prediction::*;
pub use statistics::*;
