//! Agronomic recommendations derived from an NDVI prediction

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ConfidenceLevel, NdviPrediction, PredictionBreakdown};

/// NDVI band boundaries
pub mod thresholds {
    pub const BARE_SOIL: f64 = 0.1;
    pub const SPARSE_VEGETATION: f64 = 0.3;
    pub const MODERATE_VEGETATION: f64 = 0.5;
    pub const HEALTHY_VEGETATION: f64 = 0.7;
    pub const VERY_HEALTHY: f64 = 0.8;
}

use thresholds::*;

/// Trend adjustments within this band count as stable
pub const TREND_DEAD_BAND: f64 = 0.01;

/// Change vs. current NDVI that triggers an action item
pub const NOTABLE_CHANGE: f64 = 0.1;

/// Drop vs. current NDVI that triggers a critical alert
pub const CRITICAL_DECLINE: f64 = 0.15;

/// Below this percentage a low-confidence alert is raised
pub const LOW_CONFIDENCE_ALERT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VegetationStatus {
    Bare,
    Sparse,
    Moderate,
    Healthy,
    VeryHealthy,
}

impl VegetationStatus {
    pub fn from_ndvi(ndvi: f64) -> Self {
        if ndvi < BARE_SOIL {
            VegetationStatus::Bare
        } else if ndvi < SPARSE_VEGETATION {
            VegetationStatus::Sparse
        } else if ndvi < MODERATE_VEGETATION {
            VegetationStatus::Moderate
        } else if ndvi < HEALTHY_VEGETATION {
            VegetationStatus::Healthy
        } else {
            VegetationStatus::VeryHealthy
        }
    }
}

/// One-line reading of an NDVI value
pub fn ndvi_summary(ndvi: f64) -> &'static str {
    if ndvi < BARE_SOIL {
        "Bare soil or no vegetation detected"
    } else if ndvi < SPARSE_VEGETATION {
        "Sparse vegetation with low photosynthetic activity"
    } else if ndvi < MODERATE_VEGETATION {
        "Moderate vegetation cover with developing canopy"
    } else if ndvi < HEALTHY_VEGETATION {
        "Healthy vegetation with good canopy development"
    } else if ndvi < VERY_HEALTHY {
        "Very healthy vegetation with dense canopy"
    } else {
        "Exceptionally dense and healthy vegetation"
    }
}

pub fn health_description(ndvi: f64) -> &'static str {
    if ndvi < BARE_SOIL {
        "No vegetation"
    } else if ndvi < SPARSE_VEGETATION {
        "Stressed or early growth"
    } else if ndvi < MODERATE_VEGETATION {
        "Developing"
    } else if ndvi < HEALTHY_VEGETATION {
        "Good"
    } else if ndvi < VERY_HEALTHY {
        "Excellent"
    } else {
        "Optimal"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    VeryLow,
    Low,
    Normal,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub magnitude: f64,
    pub description: &'static str,
}

pub fn trend_analysis(breakdown: &PredictionBreakdown) -> TrendAnalysis {
    let adjustment = breakdown.trend_adjustment;
    let direction = if adjustment > TREND_DEAD_BAND {
        TrendDirection::Improving
    } else if adjustment < -TREND_DEAD_BAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    let description = match direction {
        TrendDirection::Improving => "Vegetation health is improving over time",
        TrendDirection::Declining => {
            "Vegetation health is declining - intervention may be needed"
        }
        TrendDirection::Stable => "Vegetation health is stable",
    };

    TrendAnalysis {
        direction,
        magnitude: adjustment.abs(),
        description,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IrrigationAdvice {
    pub priority: Priority,
    pub action: &'static str,
    pub reason: &'static str,
    pub frequency: &'static str,
}

pub fn irrigation_advice(ndvi: f64) -> IrrigationAdvice {
    let (priority, action, reason, frequency) = if ndvi < SPARSE_VEGETATION {
        (
            Priority::High,
            "Increase irrigation immediately",
            "Low NDVI indicates water stress or insufficient vegetation",
            "Daily monitoring recommended",
        )
    } else if ndvi < MODERATE_VEGETATION {
        (
            Priority::Medium,
            "Maintain regular irrigation schedule",
            "Moderate vegetation requires consistent water supply",
            "Every 2-3 days depending on weather",
        )
    } else if ndvi < HEALTHY_VEGETATION {
        (
            Priority::Low,
            "Continue current irrigation practices",
            "Healthy vegetation with adequate water",
            "As needed based on soil moisture",
        )
    } else {
        (
            Priority::Low,
            "Reduce irrigation if possible",
            "Very healthy vegetation may indicate excess water",
            "Monitor for signs of overwatering",
        )
    };

    IrrigationAdvice {
        priority,
        action,
        reason,
        frequency,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizationAdvice {
    pub priority: Priority,
    pub action: &'static str,
    pub reason: &'static str,
    pub timing: &'static str,
    pub fertilizer: &'static str,
}

pub fn fertilization_advice(ndvi: f64, trend: TrendDirection) -> FertilizationAdvice {
    let (priority, action, reason, timing, fertilizer) =
        if ndvi < SPARSE_VEGETATION || trend == TrendDirection::Declining {
            (
                Priority::High,
                "Apply nitrogen-rich fertilizer",
                "Low NDVI or declining trend indicates nutrient deficiency",
                "Within 1-2 weeks",
                "Nitrogen (N) supplement recommended",
            )
        } else if ndvi < MODERATE_VEGETATION {
            (
                Priority::Medium,
                "Consider balanced NPK application",
                "Support vegetation development",
                "Within 3-4 weeks",
                "Balanced NPK (Nitrogen-Phosphorus-Potassium)",
            )
        } else if ndvi < VERY_HEALTHY {
            (
                Priority::Low,
                "Maintain current fertilization schedule",
                "Vegetation shows good nutrient levels",
                "As per regular schedule",
                "Maintenance application only",
            )
        } else {
            (
                Priority::VeryLow,
                "No additional fertilization needed",
                "Optimal vegetation health indicates adequate nutrients",
                "Monitor for changes",
                "None required",
            )
        };

    FertilizationAdvice {
        priority,
        action,
        reason,
        timing,
        fertilizer,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoringAdvice {
    pub frequency: &'static str,
    pub methods: [&'static str; 2],
    pub parameters: [&'static str; 3],
    pub priority: Priority,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<&'static str>,
}

/// Predictions further out than this get closer monitoring
pub const LONG_RANGE_DAYS: i64 = 60;

pub fn monitoring_advice(level: ConfidenceLevel, days_ahead: i64) -> MonitoringAdvice {
    let methods = ["Satellite imagery", "Ground observations"];
    let parameters = ["NDVI", "Soil moisture", "Weather conditions"];

    match level {
        ConfidenceLevel::VeryLow | ConfidenceLevel::Low => MonitoringAdvice {
            frequency: "every 2-3 days",
            methods,
            parameters,
            priority: Priority::High,
            reason: "Low prediction confidence requires frequent monitoring",
            alert: Some("Consider field inspection to verify conditions"),
        },
        _ if level == ConfidenceLevel::Medium || days_ahead > LONG_RANGE_DAYS => {
            MonitoringAdvice {
                frequency: "twice weekly",
                methods,
                parameters,
                priority: Priority::Medium,
                reason: "Medium confidence or long-term prediction needs regular checks",
                alert: None,
            }
        }
        _ => MonitoringAdvice {
            frequency: "weekly",
            methods,
            parameters,
            priority: Priority::Normal,
            reason: "High confidence prediction allows standard monitoring",
            alert: None,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingWindow {
    pub suitable: bool,
    pub timing: String,
    pub notes: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingAdvice {
    pub planting: Option<TimingWindow>,
    pub harvesting: Option<TimingWindow>,
    pub spraying: Option<TimingWindow>,
}

pub fn timing_advice(ndvi: f64, target_date: NaiveDate) -> TimingAdvice {
    let mut advice = TimingAdvice::default();

    if ndvi < SPARSE_VEGETATION {
        advice.planting = Some(TimingWindow {
            suitable: true,
            timing: "Good conditions for planting".to_string(),
            notes: "Low vegetation cover provides opportunity for new crops",
        });
    }
    if ndvi > HEALTHY_VEGETATION {
        advice.harvesting = Some(TimingWindow {
            suitable: true,
            timing: format!("Plan harvest around {}", target_date.format("%Y-%m-%d")),
            notes: "Peak vegetation health indicates maturity approaching",
        });
    }
    if ndvi > MODERATE_VEGETATION {
        advice.spraying = Some(TimingWindow {
            suitable: true,
            timing: "Suitable for foliar applications".to_string(),
            notes: "Good canopy cover for effective treatment",
        });
    }

    advice
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Intervention,
    Maintenance,
    Assessment,
    Planning,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub action: &'static str,
    pub description: String,
    pub category: ActionCategory,
}

/// Harvest planning is suggested for peaks closer than this
pub const HARVEST_PLANNING_DAYS: i64 = 30;

pub fn action_items(ndvi: f64, days_ahead: i64, current_ndvi: Option<f64>) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    if let Some(current) = current_ndvi {
        let change = ndvi - current;
        if change < -NOTABLE_CHANGE {
            actions.push(ActionItem {
                priority: Priority::High,
                action: "Prepare for declining vegetation health",
                description: format!(
                    "NDVI expected to drop by {:.2} in {} days",
                    change.abs(),
                    days_ahead
                ),
                category: ActionCategory::Intervention,
            });
        } else if change > NOTABLE_CHANGE {
            actions.push(ActionItem {
                priority: Priority::Low,
                action: "Maintain current practices",
                description: format!(
                    "NDVI expected to improve by {:.2} in {} days",
                    change, days_ahead
                ),
                category: ActionCategory::Maintenance,
            });
        }
    }

    if ndvi < SPARSE_VEGETATION {
        actions.push(ActionItem {
            priority: Priority::High,
            action: "Investigate low vegetation index",
            description: "Check for pest damage, disease, or nutrient deficiency".to_string(),
            category: ActionCategory::Assessment,
        });
    }

    if ndvi > VERY_HEALTHY && days_ahead < HARVEST_PLANNING_DAYS {
        actions.push(ActionItem {
            priority: Priority::Medium,
            action: "Plan harvesting operations",
            description: "Peak vegetation health approaching - prepare harvest logistics"
                .to_string(),
            category: ActionCategory::Planning,
        });
    }

    actions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: &'static str,
    pub impact: &'static str,
    pub action: &'static str,
}

pub fn alerts(prediction: &NdviPrediction, current_ndvi: Option<f64>) -> Vec<Alert> {
    let ndvi = prediction.prediction.value;
    let mut alerts = Vec::new();

    if ndvi < SPARSE_VEGETATION {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: "Low vegetation index predicted",
            impact: "Potential crop stress or poor growth",
            action: "Immediate field assessment recommended",
        });
    }

    if current_ndvi.is_some_and(|current| ndvi < current - CRITICAL_DECLINE) {
        alerts.push(Alert {
            level: AlertLevel::Critical,
            message: "Significant decline in vegetation health predicted",
            impact: "Risk of crop failure or yield loss",
            action: "Urgent intervention required",
        });
    }

    if prediction.confidence.percentage < LOW_CONFIDENCE_ALERT {
        alerts.push(Alert {
            level: AlertLevel::Info,
            message: "Low prediction confidence",
            impact: "Prediction may be less reliable",
            action: "Increase monitoring frequency and verify with ground truth",
        });
    }

    if prediction.prediction.lower_bound < BARE_SOIL {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: "Worst-case scenario shows very low vegetation",
            impact: "Possible crop failure in unfavorable conditions",
            action: "Prepare contingency plans",
        });
    }

    alerts
}

// ============================================================================
// Crop-specific guidance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CropType {
    #[default]
    General,
    Corn,
    Wheat,
    Soybean,
    Rice,
    /// Unknown crop; guidance falls back to the corn profile
    Other(String),
}

impl FromStr for CropType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "" | "general" => CropType::General,
            "corn" => CropType::Corn,
            "wheat" => CropType::Wheat,
            "soybean" => CropType::Soybean,
            "rice" => CropType::Rice,
            _ => CropType::Other(s.trim().to_string()),
        })
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropType::General => write!(f, "general"),
            CropType::Corn => write!(f, "corn"),
            CropType::Wheat => write!(f, "wheat"),
            CropType::Soybean => write!(f, "soybean"),
            CropType::Rice => write!(f, "rice"),
            CropType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Reference NDVI window and growth stages of a crop
#[derive(Debug, Clone, Copy)]
pub struct CropProfile {
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub critical_stages: &'static [&'static str],
    pub notes: &'static str,
}

const CORN: CropProfile = CropProfile {
    optimal_min: 0.6,
    optimal_max: 0.85,
    critical_stages: &["V6 (6-leaf)", "VT (tasseling)", "R1 (silking)"],
    notes: "Monitor nitrogen levels during vegetative growth",
};

const WHEAT: CropProfile = CropProfile {
    optimal_min: 0.5,
    optimal_max: 0.75,
    critical_stages: &["Tillering", "Booting", "Heading"],
    notes: "Peak NDVI occurs during heading stage",
};

const SOYBEAN: CropProfile = CropProfile {
    optimal_min: 0.6,
    optimal_max: 0.8,
    critical_stages: &["V3-V5", "R1 (flowering)", "R5 (seed fill)"],
    notes: "Maintain adequate moisture during pod fill",
};

const RICE: CropProfile = CropProfile {
    optimal_min: 0.65,
    optimal_max: 0.85,
    critical_stages: &["Tillering", "Panicle initiation", "Flowering"],
    notes: "Keep fields flooded during critical growth stages",
};

impl CropType {
    /// Profile for crop-specific guidance; `None` for general requests
    pub fn profile(&self) -> Option<CropProfile> {
        match self {
            CropType::General => None,
            CropType::Corn | CropType::Other(_) => Some(CORN),
            CropType::Wheat => Some(WHEAT),
            CropType::Soybean => Some(SOYBEAN),
            CropType::Rice => Some(RICE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvice {
    pub crop_type: String,
    pub optimal_range: OptimalRange,
    pub status: &'static str,
    pub critical_stages: &'static [&'static str],
    pub notes: &'static str,
}

pub fn crop_advice(crop: &CropType, ndvi: f64) -> Option<CropAdvice> {
    let profile = crop.profile()?;
    let status = if ndvi < profile.optimal_min {
        "Below optimal - needs attention"
    } else if ndvi <= profile.optimal_max {
        "Within optimal range"
    } else {
        "Above optimal - monitor for issues"
    };

    Some(CropAdvice {
        crop_type: crop.to_string(),
        optimal_range: OptimalRange {
            min: profile.optimal_min,
            max: profile.optimal_max,
        },
        status,
        critical_stages: profile.critical_stages,
        notes: profile.notes,
    })
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecommendationOptions {
    pub crop_type: CropType,
    /// Latest observed NDVI, used to judge the predicted change
    pub current_ndvi: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VegetationAssessment {
    pub status: VegetationStatus,
    pub health: &'static str,
    pub trend: TrendAnalysis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub summary: &'static str,
    pub vegetation: VegetationAssessment,
    pub actions: Vec<ActionItem>,
    pub alerts: Vec<Alert>,
    pub irrigation: IrrigationAdvice,
    pub fertilization: FertilizationAdvice,
    pub monitoring: MonitoringAdvice,
    pub timing: TimingAdvice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_specific: Option<CropAdvice>,
}

pub fn recommend(prediction: &NdviPrediction, options: &RecommendationOptions) -> Recommendations {
    let ndvi = prediction.prediction.value;
    let days_ahead = prediction.prediction.days_ahead;
    let trend = trend_analysis(&prediction.breakdown);

    Recommendations {
        summary: ndvi_summary(ndvi),
        fertilization: fertilization_advice(ndvi, trend.direction),
        vegetation: VegetationAssessment {
            status: VegetationStatus::from_ndvi(ndvi),
            health: health_description(ndvi),
            trend,
        },
        actions: action_items(ndvi, days_ahead, options.current_ndvi),
        alerts: alerts(prediction, options.current_ndvi),
        irrigation: irrigation_advice(ndvi),
        monitoring: monitoring_advice(prediction.confidence.level, days_ahead),
        timing: timing_advice(ndvi, prediction.prediction.target_date),
        crop_specific: crop_advice(&options.crop_type, ndvi),
    }
}
