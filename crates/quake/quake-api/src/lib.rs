//! Quake Consumer API
//!
//! Consumer configurations and builder APIs for regional earthquake
//! forecasting.
//!
//! This crate provides:
//! - Configuration types for every pipeline stage (serde + TOML)
//! - The bundled region table
//! - A builder for a configured `ForecastEngine`
//! - Re-exports from SPI and core for convenience

pub mod builder;
pub mod config;
pub mod registry_config;

pub use builder::EngineBuilder;
pub use config::{
    AnalysisConfig, EngineConfig, FilterConfig, OutlierConfig, PredictorConfig, QuakeConfig,
    ScoringConfig,
};
pub use registry_config::{RegionConfig, RegistryConfig};

// Re-export from core
pub use quake_core::{
    activity, analysis, confidence, engine, filter, outlier, predictor, quality, registry,
    seasonality, stats, FiveFactorScorer, ForecastEngine, IntervalPredictor, IqrOutlierRemover,
    LocationStrategy, RegionEventFilter, RegionRegistry, SeismicPatternAnalyzer,
};

// Re-export traits and models from SPI
pub use quake_spi::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EngineBuilder, EngineConfig, QuakeConfig, RegistryConfig};
    pub use quake_core::{ForecastEngine, LocationStrategy, RegionRegistry};
    pub use quake_spi::{
        ConfidenceBreakdown, ConfidenceScorer, Event, EventFilter, EventSeries, ForecastReport,
        GeoPoint, OutlierRemover, PatternAnalyzer, PatternSummary, Prediction, Predictor,
        QuakeError, RegionAnalysis, RegionDefinition, Result,
    };
}
