//! Trait for projecting the next event

use crate::error::Result;
use crate::model::{PatternSummary, Projection, RegionDefinition};
use chrono::{DateTime, Utc};

/// Trait for projecting the next significant event of a region
pub trait Predictor: Send + Sync {
    /// Project date, magnitude and location.
    ///
    /// The projected date is strictly after `now`. A summary without
    /// interval statistics yields `QuakeError::InsufficientData`.
    fn project(
        &self,
        summary: &PatternSummary,
        region: &RegionDefinition,
        now: DateTime<Utc>,
    ) -> Result<Projection>;
}
