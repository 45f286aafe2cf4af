//! Trait for turning a cleaned series into a pattern summary

use crate::model::{CleanedSeries, PatternSummary};

/// Trait for computing the statistical digest of a cleaned series
pub trait PatternAnalyzer: Send + Sync {
    /// Summarize the series. Total over 0- and 1-event series, which
    /// yield a summary without interval statistics.
    fn analyze(&self, cleaned: &CleanedSeries) -> PatternSummary;
}
