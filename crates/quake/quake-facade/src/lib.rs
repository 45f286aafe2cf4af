//! Quake Facade
//!
//! High-level API for regional earthquake forecasting. Re-exports all public
//! types from the quake stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use quake_api::*;

// Explicit re-exports for documentation
pub use quake_api::prelude;

// Re-export core modules for direct access
pub use quake_core::{activity, analysis, confidence, outlier, predictor, quality, seasonality, stats};

// Re-export pipeline types at root
pub use quake_core::{
    FiveFactorScorer, ForecastEngine, IntervalPredictor, IqrOutlierRemover, LocationStrategy,
    RegionEventFilter, RegionRegistry, SeismicPatternAnalyzer,
};

// Re-export SPI traits
pub use quake_spi::{ConfidenceScorer, EventFilter, OutlierRemover, PatternAnalyzer, Predictor};
