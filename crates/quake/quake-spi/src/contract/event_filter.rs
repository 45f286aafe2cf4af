//! Trait for selecting a region's significant events

use crate::model::{Event, FilterOutcome, RegionDefinition};

/// Trait for selecting the events of one region from a merged catalog
pub trait EventFilter: Send + Sync {
    /// Return the time-sorted qualifying events and the drop counters.
    ///
    /// Malformed records are skipped and counted, never fatal.
    fn filter(&self, catalog: &[Event], region: &RegionDefinition) -> FilterOutcome;
}
