//! Trait for confidence scoring

use crate::model::{ConfidenceBreakdown, PatternSummary};
use chrono::{DateTime, Utc};

/// Trait for scoring how far a pattern summary can be trusted
pub trait ConfidenceScorer: Send + Sync {
    /// Score the summary relative to the reference date.
    ///
    /// Deterministic: identical inputs yield identical breakdowns.
    fn score(&self, summary: &PatternSummary, now: DateTime<Utc>) -> ConfidenceBreakdown;
}
