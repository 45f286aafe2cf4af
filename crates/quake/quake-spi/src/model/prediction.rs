//! Prediction models

use crate::model::{GeoPoint, PatternSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Date/magnitude/location projection produced by a predictor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Strictly after the reference date
    pub predicted_date: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Within the observed magnitude range
    pub magnitude: f64,
    pub location: GeoPoint,
    pub depth_km: f64,
    /// `recent_weight * recent + (1 - recent_weight) * median`, in days
    pub weighted_interval_days: f64,
    /// How many extra intervals were added to reach the future
    pub cycles_advanced: u64,
    pub last_event: DateTime<Utc>,
    pub days_since_last: i64,
}

/// Damage class of a predicted magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl RiskLevel {
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude < 4.5 {
            RiskLevel::Low
        } else if magnitude < 5.5 {
            RiskLevel::Moderate
        } else if magnitude < 6.5 {
            RiskLevel::High
        } else if magnitude < 7.5 {
            RiskLevel::VeryHigh
        } else {
            RiskLevel::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::Extreme => "Extreme",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Light shaking, minimal damage",
            RiskLevel::Moderate => "Moderate shaking, some damage",
            RiskLevel::High => "Strong shaking, considerable damage",
            RiskLevel::VeryHigh => "Severe shaking, major damage",
            RiskLevel::Extreme => "Violent shaking, catastrophic damage",
        }
    }
}

/// Qualitative regularity of the interval pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStrength {
    Strong,
    Moderate,
    Weak,
}

impl PatternStrength {
    /// Classify a temporal consistency value (`1 - cv`)
    pub fn from_consistency(consistency: Option<f64>) -> Self {
        match consistency {
            Some(c) if c > 0.7 => PatternStrength::Strong,
            Some(c) if c > 0.4 => PatternStrength::Moderate,
            _ => PatternStrength::Weak,
        }
    }
}

/// Coarse tectonic setting of a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TectonicZone {
    PacificRing,
    MediterraneanHimalayan,
    MidAtlanticRidge,
    Other,
}

impl TectonicZone {
    pub fn classify(latitude: f64, longitude: f64) -> Self {
        let pacific_lon = (110.0..=180.0).contains(&longitude) || (-180.0..=-100.0).contains(&longitude);
        if (-60.0..=70.0).contains(&latitude) && pacific_lon {
            TectonicZone::PacificRing
        } else if (20.0..=50.0).contains(&latitude) && (-10.0..=160.0).contains(&longitude) {
            TectonicZone::MediterraneanHimalayan
        } else if (-40.0..=-10.0).contains(&longitude) && (-60.0..=70.0).contains(&latitude) {
            TectonicZone::MidAtlanticRidge
        } else {
            TectonicZone::Other
        }
    }
}

/// Forecast for one region, as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub region: String,
    pub predicted_date: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub magnitude: f64,
    pub location: GeoPoint,
    pub depth_km: f64,
    /// In [35, 85]
    pub confidence: f64,
    pub expected_interval_years: f64,
    pub days_since_last: i64,
    pub risk_level: RiskLevel,
    pub pattern_strength: PatternStrength,
    pub zone: TectonicZone,
}

impl Prediction {
    /// Combine a projection with its confidence score.
    pub fn assemble(
        region: &str,
        projection: &Projection,
        summary: &PatternSummary,
        confidence: f64,
    ) -> Self {
        let consistency = summary.intervals.and_then(|s| s.temporal_consistency());
        Self {
            region: region.to_string(),
            predicted_date: projection.predicted_date,
            window_start: projection.window_start,
            window_end: projection.window_end,
            magnitude: projection.magnitude,
            location: projection.location,
            depth_km: projection.depth_km,
            confidence,
            expected_interval_years: projection.weighted_interval_days / 365.25,
            days_since_last: projection.days_since_last,
            risk_level: RiskLevel::from_magnitude(projection.magnitude),
            pattern_strength: PatternStrength::from_consistency(consistency),
            zone: TectonicZone::classify(projection.location.latitude, projection.location.longitude),
        }
    }
}
