//! IQR-based interval outlier removal

use crate::stats::quantile_sorted;
use quake_spi::{
    CleanedSeries, EventSeries, Fence, IntervalSet, OutlierOutcome, OutlierRemover, QuakeError,
    Result,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Interquartile Range (IQR) interval filter
///
/// Drops gaps outside `[Q1 - k*IQR, Q3 + k*IQR]`. Inputs shorter than
/// `min_intervals` are returned unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IqrOutlierRemover {
    multiplier: f64,
    min_intervals: usize,
}

impl IqrOutlierRemover {
    /// Create a new remover
    ///
    /// # Arguments
    ///
    /// * `multiplier` - IQR multiplier for the fence (typically 1.5)
    /// * `min_intervals` - smallest input on which quartiles are estimated
    pub fn new(multiplier: f64, min_intervals: usize) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(QuakeError::invalid_parameter(
                "multiplier",
                "must be positive",
            ));
        }
        if min_intervals == 0 {
            return Err(QuakeError::invalid_parameter(
                "min_intervals",
                "must be at least 1",
            ));
        }
        Ok(Self {
            multiplier,
            min_intervals,
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn min_intervals(&self) -> usize {
        self.min_intervals
    }

    /// Fence for the given values; `None` below `min_intervals`
    pub fn fence(&self, values: &[f64]) -> Option<Fence> {
        if values.len() < self.min_intervals {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(Fence {
            q1,
            q3,
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        })
    }
}

impl Default for IqrOutlierRemover {
    fn default() -> Self {
        Self {
            multiplier: 1.5,
            min_intervals: 4,
        }
    }
}

impl OutlierRemover for IqrOutlierRemover {
    fn remove(&self, intervals: &IntervalSet) -> OutlierOutcome {
        let Some(fence) = self.fence(intervals.values()) else {
            return OutlierOutcome::unchanged(intervals);
        };

        let mask: Vec<bool> = intervals.values().iter().map(|d| fence.contains(*d)).collect();
        let outcome = OutlierOutcome {
            retained: intervals.retain_mask(&mask),
            mask,
            fence: Some(fence),
        };
        debug!(
            lower = fence.lower,
            upper = fence.upper,
            removed = outcome.removed(),
            "Applied IQR fence"
        );
        outcome
    }

    fn clean(&self, series: &EventSeries) -> CleanedSeries {
        let outcome = self.remove(&series.intervals());
        let removed_intervals = outcome.removed();
        if removed_intervals == 0 {
            return CleanedSeries {
                events: series.clone(),
                intervals: outcome.retained,
                removed_intervals,
            };
        }

        // Interval i joins events i and i + 1
        let last = series.len().saturating_sub(1);
        let mask = &outcome.mask;
        let events = series
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                *i == 0
                    || *i == last
                    || mask.get(*i).copied().unwrap_or(false)
                    || mask.get(*i - 1).copied().unwrap_or(false)
            })
            .map(|(_, e)| *e)
            .collect();

        CleanedSeries {
            events: EventSeries::new(events),
            intervals: outcome.retained,
            removed_intervals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use quake_spi::Event;

    fn series_from_gaps(gaps: &[f64]) -> EventSeries {
        let mut t = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        let mut events = vec![Event::new(t, 38.0, 142.0, 20.0, 5.0)];
        for (i, gap) in gaps.iter().enumerate() {
            t += Duration::milliseconds((gap * 86_400_000.0) as i64);
            events.push(Event::new(t, 38.0, 142.0, 20.0, 5.0 + i as f64 * 0.01));
        }
        EventSeries::new(events)
    }

    #[test]
    fn test_drops_far_outlier() {
        let set = IntervalSet::new(vec![10.0, 12.0, 11.0, 9.0, 500.0, 10.0, 13.0]).unwrap();
        let outcome = IqrOutlierRemover::default().remove(&set);
        assert_eq!(outcome.retained.values(), &[10.0, 12.0, 11.0, 9.0, 10.0, 13.0]);
        assert_eq!(outcome.mask, vec![true, true, true, true, false, true, true]);

        let fence = outcome.fence.unwrap();
        assert_eq!(fence.q1, 10.0);
        assert_eq!(fence.q3, 12.5);
        assert_eq!(fence.lower, 6.25);
        assert_eq!(fence.upper, 16.25);
    }

    #[test]
    fn test_short_input_is_noop() {
        let remover = IqrOutlierRemover::default();
        for values in [vec![], vec![1.0], vec![1.0, 1000.0], vec![1.0, 2.0, 1000.0]] {
            let set = IntervalSet::new(values).unwrap();
            let outcome = remover.remove(&set);
            assert_eq!(outcome.retained, set);
            assert!(outcome.fence.is_none());
        }
    }

    #[test]
    fn test_remove_does_not_mutate_input() {
        let set = IntervalSet::new(vec![1.0, 1.0, 1.0, 1.0, 90.0]).unwrap();
        let before = set.clone();
        let _ = IqrOutlierRemover::default().remove(&set);
        assert_eq!(set, before);
    }

    #[test]
    fn test_clean_keeps_events_adjacent_to_retained_gaps() {
        let series = series_from_gaps(&[10.0, 12.0, 11.0, 9.0, 500.0, 10.0, 13.0]);
        let cleaned = IqrOutlierRemover::default().clean(&series);
        // Both ends of the dropped gap border a retained gap
        assert_eq!(cleaned.events.len(), 8);
        assert_eq!(cleaned.intervals.len(), 6);
        assert_eq!(cleaned.removed_intervals, 1);
    }

    #[test]
    fn test_clean_drops_isolated_event() {
        // Event 5 sits between two outlier gaps
        let series = series_from_gaps(&[10.0, 11.0, 10.0, 12.0, 400.0, 450.0, 11.0, 10.0]);
        let cleaned = IqrOutlierRemover::default().clean(&series);
        assert_eq!(cleaned.removed_intervals, 2);
        assert_eq!(cleaned.events.len(), series.len() - 1);
        assert_eq!(cleaned.events.first(), series.first());
        assert_eq!(cleaned.events.last(), series.last());
    }

    #[test]
    fn test_clean_always_keeps_endpoints() {
        let series = series_from_gaps(&[900.0, 10.0, 11.0, 10.0, 12.0, 11.0, 10.0, 950.0]);
        let cleaned = IqrOutlierRemover::default().clean(&series);
        assert_eq!(cleaned.removed_intervals, 2);
        assert_eq!(cleaned.events.first(), series.first());
        assert_eq!(cleaned.events.last(), series.last());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(IqrOutlierRemover::new(0.0, 4).is_err());
        assert!(IqrOutlierRemover::new(-1.0, 4).is_err());
        assert!(IqrOutlierRemover::new(1.5, 0).is_err());
        let err = IqrOutlierRemover::new(f64::NAN, 4).unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter 'multiplier': must be positive");
    }
}
