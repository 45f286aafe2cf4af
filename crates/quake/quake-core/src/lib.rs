//! Quake Core
//!
//! Core implementations of the forecasting pipeline: event filtering,
//! IQR outlier removal, pattern analysis, interval prediction, five-factor
//! confidence scoring, plus the region registry and the engine tying them
//! together.

pub mod activity;
pub mod analysis;
pub mod confidence;
pub mod engine;
pub mod filter;
pub mod outlier;
pub mod predictor;
pub mod quality;
pub mod registry;
pub mod seasonality;
pub mod stats;

// Re-export SPI for implementations
pub use quake_spi::*;

// Re-export main types
pub use analysis::SeismicPatternAnalyzer;
pub use confidence::FiveFactorScorer;
pub use engine::ForecastEngine;
pub use filter::RegionEventFilter;
pub use outlier::IqrOutlierRemover;
pub use predictor::{IntervalPredictor, LocationStrategy};
pub use registry::RegionRegistry;
