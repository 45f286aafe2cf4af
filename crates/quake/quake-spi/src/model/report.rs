//! Diagnostic report models

use crate::model::{ConfidenceBreakdown, Event, FilterStats, PatternSummary, Prediction};
use serde::{Deserialize, Serialize};

/// Catalog quality assessment, 0..=100; informational only
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub time_span_points: u32,
    pub volume_points: u32,
    pub recency_points: u32,
    pub magnitude_range_points: u32,
    pub score: u32,
}

/// Activity in the region over a trailing window before the reference date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub window_days: i64,
    /// In-region events of any magnitude inside the window
    pub total_events: usize,
    /// Window events at or above the significance threshold
    pub significant_events: usize,
    pub latest_event: Option<Event>,
    pub days_since_latest: Option<i64>,
    /// Latest significant event, searched over the whole history
    pub latest_significant: Option<Event>,
    pub days_since_significant: Option<i64>,
}

/// Everything derived for a region short of a date prediction
#[derive(Debug, Clone, Serialize)]
pub struct RegionAnalysis {
    pub region: String,
    pub display_name: String,
    pub threshold: f64,
    pub summary: PatternSummary,
    pub breakdown: ConfidenceBreakdown,
    pub filter: FilterStats,
    pub quality: DataQuality,
    pub activity: RecentActivity,
}

/// Prediction plus the diagnostics behind it
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub prediction: Prediction,
    pub analysis: RegionAnalysis,
}

impl ForecastReport {
    /// Final confidence score
    pub fn confidence(&self) -> f64 {
        self.prediction.confidence
    }
}
