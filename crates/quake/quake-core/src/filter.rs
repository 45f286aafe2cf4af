//! Region/significance event filter

use quake_spi::{
    Event, EventFilter, EventSeries, FilterOutcome, FilterStats, QuakeError, RegionDefinition,
    Result, DEFAULT_SIGNIFICANCE_THRESHOLD,
};
use tracing::{debug, warn};

/// Keeps well-formed events inside a region at or above its threshold.
///
/// The threshold applied is the region override when present, otherwise
/// `default_threshold`.
#[derive(Debug, Clone)]
pub struct RegionEventFilter {
    default_threshold: f64,
}

impl RegionEventFilter {
    pub fn new(default_threshold: f64) -> Result<Self> {
        if !default_threshold.is_finite() {
            return Err(QuakeError::invalid_parameter(
                "default_threshold",
                "must be finite",
            ));
        }
        Ok(Self { default_threshold })
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }
}

impl Default for RegionEventFilter {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

impl EventFilter for RegionEventFilter {
    fn filter(&self, catalog: &[Event], region: &RegionDefinition) -> FilterOutcome {
        let threshold = region.significance_threshold(self.default_threshold);
        let mut stats = FilterStats {
            total: catalog.len(),
            ..Default::default()
        };
        let mut kept = Vec::new();

        for event in catalog {
            if let Err(QuakeError::MalformedEvent { reason }) = event.validate() {
                *stats.malformed.entry(reason).or_insert(0) += 1;
                continue;
            }
            if !region.contains(event.latitude, event.longitude) {
                stats.outside_region += 1;
                continue;
            }
            if event.magnitude < threshold {
                stats.below_threshold += 1;
                continue;
            }
            kept.push(*event);
        }

        stats.qualifying = kept.len();
        if stats.malformed_total() > 0 {
            warn!(
                region = %region.name,
                dropped = stats.malformed_total(),
                "Skipped malformed catalog records"
            );
        }
        debug!(
            region = %region.name,
            threshold,
            total = stats.total,
            qualifying = stats.qualifying,
            "Filtered catalog"
        );

        FilterOutcome {
            series: EventSeries::new(kept),
            stats,
        }
    }
}
