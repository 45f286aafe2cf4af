//! Contract module containing trait definitions for the forecasting pipeline

mod confidence_scorer;
mod event_filter;
mod outlier_remover;
mod pattern_analyzer;
mod predictor;

pub use confidence_scorer::ConfidenceScorer;
pub use event_filter::EventFilter;
pub use outlier_remover::OutlierRemover;
pub use pattern_analyzer::PatternAnalyzer;
pub use predictor::Predictor;
