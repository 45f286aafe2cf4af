//! Quake Service Provider Interface
//!
//! Defines the domain models, pipeline contracts and error taxonomy for
//! regional earthquake pattern analysis and confidence scoring.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceScorer, EventFilter, OutlierRemover, PatternAnalyzer, Predictor};
pub use error::{QuakeError, Result};
pub use model::{
    CleanedSeries, ConfidenceBreakdown, DataQuality, DepthStats, Event, EventSeries, Fence,
    FilterOutcome, FilterStats, ForecastReport, GeoPoint, IntervalSet, IntervalStats,
    MagnitudeStats, MagnitudeTrend, MalformedReason, OutlierOutcome, PatternStrength,
    PatternSummary, Prediction, Projection, RecentActivity, RecentLocation, RegionAnalysis,
    RegionBounds, RegionDefinition, RiskLevel, Season, SeasonalDistribution, TectonicZone,
    CONFIDENCE_CEILING, CONFIDENCE_FLOOR, DEFAULT_SIGNIFICANCE_THRESHOLD,
};
