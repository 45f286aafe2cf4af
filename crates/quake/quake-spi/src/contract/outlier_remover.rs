//! Trait for outlier removal on inter-event intervals

use crate::model::{CleanedSeries, EventSeries, IntervalSet, OutlierOutcome};

/// Trait for dropping extreme inter-event intervals
pub trait OutlierRemover: Send + Sync {
    /// Decide which intervals to keep. Does not mutate the input.
    fn remove(&self, intervals: &IntervalSet) -> OutlierOutcome;

    /// Clean a series: keep retained intervals and the events adjacent to them.
    fn clean(&self, series: &EventSeries) -> CleanedSeries;
}
