//! Event series, interval sets and the outcomes of the cleaning stages

use crate::error::{QuakeError, Result};
use crate::model::{Event, MalformedReason};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Time-ordered events of one region.
///
/// Construction sorts by timestamp with a stable sort, so ties keep the
/// order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSeries {
    events: Vec<Event>,
}

impl EventSeries {
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Gaps in days between consecutive events
    pub fn intervals(&self) -> IntervalSet {
        let days = self
            .events
            .windows(2)
            .map(|w| (w[1].timestamp - w[0].timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY)
            .collect();
        IntervalSet { days }
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Gaps in days between consecutive events; every value is finite and >= 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    days: Vec<f64>,
}

impl IntervalSet {
    /// Build from raw day values, rejecting negative or non-finite gaps.
    pub fn new(days: Vec<f64>) -> Result<Self> {
        if let Some(bad) = days.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(QuakeError::invalid_parameter(
                "intervals",
                &format!("gap {} is not a finite non-negative day count", bad),
            ));
        }
        Ok(Self { days })
    }

    pub fn values(&self) -> &[f64] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Keep the values whose mask entry is `true`
    pub fn retain_mask(&self, mask: &[bool]) -> Self {
        let days = self
            .days
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(d, _)| *d)
            .collect();
        Self { days }
    }
}

/// Counters reported by the event filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Records examined
    pub total: usize,
    /// Records that ended up in the series
    pub qualifying: usize,
    /// Well-formed records outside the region bounds
    pub outside_region: usize,
    /// In-region records below the significance threshold
    pub below_threshold: usize,
    /// Dropped records per reason
    pub malformed: BTreeMap<MalformedReason, usize>,
}

impl FilterStats {
    pub fn malformed_total(&self) -> usize {
        self.malformed.values().sum()
    }
}

/// Series produced by the event filter together with its counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub series: EventSeries,
    pub stats: FilterStats,
}

/// Inclusive acceptance band of the IQR rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of outlier removal on an interval set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierOutcome {
    /// Retained intervals, input order
    pub retained: IntervalSet,
    /// One flag per input interval, `true` when retained
    pub mask: Vec<bool>,
    /// Fence used; `None` when removal was skipped for a short input
    pub fence: Option<Fence>,
}

impl OutlierOutcome {
    /// Outcome that keeps every interval
    pub fn unchanged(intervals: &IntervalSet) -> Self {
        Self {
            retained: intervals.clone(),
            mask: vec![true; intervals.len()],
            fence: None,
        }
    }

    pub fn removed(&self) -> usize {
        self.mask.iter().filter(|keep| !**keep).count()
    }
}

/// Event series after outlier removal.
///
/// `intervals` holds the retained gaps and is not recomputed from `events`:
/// a dropped gap whose end events are both kept still must not be counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanedSeries {
    pub events: EventSeries,
    pub intervals: IntervalSet,
    pub removed_intervals: usize,
}

impl CleanedSeries {
    /// Wrap a series without removing anything
    pub fn from_series(series: EventSeries) -> Self {
        let intervals = series.intervals();
        Self {
            events: series,
            intervals,
            removed_intervals: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event_at_day(day: i64, magnitude: f64) -> Event {
        let base = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        Event::new(base + Duration::days(day), 10.0, 10.0, 10.0, magnitude)
    }

    #[test]
    fn test_series_sorts_by_time() {
        let series = EventSeries::new(vec![
            event_at_day(20, 4.0),
            event_at_day(0, 4.1),
            event_at_day(10, 4.2),
        ]);
        let days: Vec<f64> = series.iter().map(|e| e.magnitude).collect();
        assert_eq!(days, vec![4.1, 4.2, 4.0]);
    }

    #[test]
    fn test_series_sort_is_stable_on_ties() {
        let series = EventSeries::new(vec![
            event_at_day(5, 4.5),
            event_at_day(1, 4.0),
            event_at_day(5, 4.6),
            event_at_day(5, 4.7),
        ]);
        let mags: Vec<f64> = series.iter().map(|e| e.magnitude).collect();
        assert_eq!(mags, vec![4.0, 4.5, 4.6, 4.7]);
    }

    #[test]
    fn test_intervals_in_days() {
        let series = EventSeries::new(vec![
            event_at_day(0, 4.0),
            event_at_day(10, 4.0),
            event_at_day(25, 4.0),
        ]);
        let intervals = series.intervals();
        assert_eq!(intervals.values(), &[10.0, 15.0]);
        assert_eq!(intervals.len(), series.len() - 1);
    }

    #[test]
    fn test_intervals_fractional_days() {
        let base = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let series = EventSeries::new(vec![
            Event::new(base, 0.0, 0.0, 5.0, 4.0),
            Event::new(base + Duration::hours(12), 0.0, 0.0, 5.0, 4.0),
        ]);
        assert_eq!(series.intervals().values(), &[0.5]);
    }

    #[test]
    fn test_empty_and_single_series_have_no_intervals() {
        assert!(EventSeries::default().intervals().is_empty());
        assert!(EventSeries::new(vec![event_at_day(0, 4.0)]).intervals().is_empty());
    }

    #[test]
    fn test_interval_set_rejects_negative() {
        assert!(IntervalSet::new(vec![1.0, -0.5]).is_err());
        assert!(IntervalSet::new(vec![1.0, f64::NAN]).is_err());
        assert!(IntervalSet::new(vec![0.0, 3.0]).is_ok());
    }

    #[test]
    fn test_retain_mask() {
        let set = IntervalSet::new(vec![1.0, 2.0, 3.0]).unwrap();
        let kept = set.retain_mask(&[true, false, true]);
        assert_eq!(kept.values(), &[1.0, 3.0]);
    }

    #[test]
    fn test_fence() {
        let fence = Fence {
            q1: 10.0,
            q3: 12.5,
            lower: 6.25,
            upper: 16.25,
        };
        assert_eq!(fence.iqr(), 2.5);
        assert!(fence.contains(6.25));
        assert!(fence.contains(16.25));
        assert!(!fence.contains(500.0));
    }

    #[test]
    fn test_outlier_outcome_unchanged() {
        let set = IntervalSet::new(vec![1.0, 2.0]).unwrap();
        let outcome = OutlierOutcome::unchanged(&set);
        assert_eq!(outcome.retained, set);
        assert_eq!(outcome.removed(), 0);
        assert!(outcome.fence.is_none());
    }

    #[test]
    fn test_filter_stats_malformed_total() {
        let mut stats = FilterStats::default();
        stats.malformed.insert(MalformedReason::InvalidDepth, 2);
        stats.malformed.insert(MalformedReason::LatitudeOutOfRange, 3);
        assert_eq!(stats.malformed_total(), 5);
    }
}
