//! Coarse land-cover reading of a single NDVI sample, as shown on the map

use serde::{Deserialize, Serialize};

/// Below this NDVI the pixel is water, snow or cloud
pub const WATER_MAX: f64 = 0.0;

/// Below this NDVI the ground is mostly bare
pub const BARE_MAX: f64 = 0.2;

/// Below this NDVI the cover is moderate, above it dense
pub const MODERATE_MAX: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandCover {
    WaterSnowClouds,
    BareSoil,
    ModerateVegetation,
    DenseVegetation,
}

impl LandCover {
    pub fn from_ndvi(ndvi: f64) -> Self {
        if ndvi < WATER_MAX {
            LandCover::WaterSnowClouds
        } else if ndvi < BARE_MAX {
            LandCover::BareSoil
        } else if ndvi < MODERATE_MAX {
            LandCover::ModerateVegetation
        } else {
            LandCover::DenseVegetation
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LandCover::WaterSnowClouds => "Water, snow or clouds",
            LandCover::BareSoil => {
                "Very little or no vegetation. Bare soil, rocks, sand, urban areas."
            }
            LandCover::ModerateVegetation => {
                "Moderate vegetation. Grasslands, shrubs, or plants at the beginning or end of their growing season."
            }
            LandCover::DenseVegetation => {
                "Very dense and healthy vegetation. Think of a forest in midsummer or a thriving crop."
            }
        }
    }
}

impl std::fmt::Display for LandCover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            LandCover::WaterSnowClouds => "water_snow_clouds",
            LandCover::BareSoil => "bare_soil",
            LandCover::ModerateVegetation => "moderate_vegetation",
            LandCover::DenseVegetation => "dense_vegetation",
        };
        write!(f, "{}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_ndvi_is_water() {
        assert_eq!(LandCover::from_ndvi(-0.3), LandCover::WaterSnowClouds);
        assert_eq!(LandCover::from_ndvi(-0.001), LandCover::WaterSnowClouds);
        assert_eq!(LandCover::from_ndvi(-0.3).description(), "Water, snow or clouds");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(LandCover::from_ndvi(0.0), LandCover::BareSoil);
        assert_eq!(LandCover::from_ndvi(0.19), LandCover::BareSoil);
        assert_eq!(LandCover::from_ndvi(0.2), LandCover::ModerateVegetation);
        assert_eq!(LandCover::from_ndvi(0.59), LandCover::ModerateVegetation);
        assert_eq!(LandCover::from_ndvi(0.6), LandCover::DenseVegetation);
        assert_eq!(LandCover::from_ndvi(1.0), LandCover::DenseVegetation);
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(LandCover::WaterSnowClouds.to_string(), "water_snow_clouds");
        assert_eq!(LandCover::DenseVegetation.to_string(), "dense_vegetation");
    }
}
