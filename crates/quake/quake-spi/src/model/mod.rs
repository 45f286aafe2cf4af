//! Model module containing data structures

mod confidence;
mod event;
mod prediction;
mod region;
mod report;
mod series;
mod summary;

pub use confidence::{
    rescale, ConfidenceBreakdown, CONFIDENCE_CEILING, CONFIDENCE_FLOOR, DATA_RECENCY_CAP,
    DATA_VOLUME_CAP, GEOGRAPHIC_CONSISTENCY_CAP, PATTERN_REGULARITY_CAP, SEASONAL_STRENGTH_CAP,
};
pub use event::{Event, MalformedReason};
pub use prediction::{PatternStrength, Prediction, Projection, RiskLevel, TectonicZone};
pub use region::{GeoPoint, RegionBounds, RegionDefinition, DEFAULT_SIGNIFICANCE_THRESHOLD};
pub use report::{DataQuality, ForecastReport, RecentActivity, RegionAnalysis};
pub use series::{
    CleanedSeries, EventSeries, Fence, FilterOutcome, FilterStats, IntervalSet, OutlierOutcome,
};
pub use summary::{
    DepthStats, IntervalStats, MagnitudeStats, MagnitudeTrend, PatternSummary, RecentLocation,
    Season, SeasonalDistribution, ZERO_SPREAD_CONSISTENCY,
};
