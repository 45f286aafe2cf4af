//! Pattern analysis of a cleaned event series

use crate::seasonality::monthly_distribution;
use crate::stats::{mean, median, ols_slope, sample_std_dev};
use quake_spi::{
    CleanedSeries, DepthStats, Event, IntervalStats, MagnitudeStats, MagnitudeTrend,
    PatternAnalyzer, PatternSummary, QuakeError, RecentLocation, Result,
};
use tracing::debug;

const MILLIS_PER_YEAR: f64 = 365.25 * 86_400_000.0;

/// Interval, seasonal, magnitude and depth statistics of a cleaned series
#[derive(Debug, Clone)]
pub struct SeismicPatternAnalyzer {
    shallow_depth_km: f64,
    trend_dead_zone: f64,
    recent_window: usize,
    major_magnitude: f64,
}

impl SeismicPatternAnalyzer {
    /// Create a new analyzer
    ///
    /// # Arguments
    ///
    /// * `shallow_depth_km` - events strictly above this depth count as shallow
    /// * `trend_dead_zone` - slopes within `±dead_zone` are reported as stable
    /// * `recent_window` - trailing intervals/events used for recent estimates
    /// * `major_magnitude` - magnitude at which an event counts as major
    pub fn new(
        shallow_depth_km: f64,
        trend_dead_zone: f64,
        recent_window: usize,
        major_magnitude: f64,
    ) -> Result<Self> {
        if !shallow_depth_km.is_finite() || shallow_depth_km <= 0.0 {
            return Err(QuakeError::invalid_parameter(
                "shallow_depth_km",
                "must be positive",
            ));
        }
        if !trend_dead_zone.is_finite() || trend_dead_zone < 0.0 {
            return Err(QuakeError::invalid_parameter(
                "trend_dead_zone",
                "must be non-negative",
            ));
        }
        if recent_window == 0 {
            return Err(QuakeError::invalid_parameter(
                "recent_window",
                "must be at least 1",
            ));
        }
        if !major_magnitude.is_finite() {
            return Err(QuakeError::invalid_parameter(
                "major_magnitude",
                "must be finite",
            ));
        }
        Ok(Self {
            shallow_depth_km,
            trend_dead_zone,
            recent_window,
            major_magnitude,
        })
    }

    pub fn recent_window(&self) -> usize {
        self.recent_window
    }

    fn interval_stats(&self, days: &[f64]) -> Option<IntervalStats> {
        let recent = if days.len() >= 2 {
            let start = days.len().saturating_sub(self.recent_window);
            mean(&days[start..])
        } else {
            None
        };
        Some(IntervalStats {
            median: median(days)?,
            mean: mean(days)?,
            std_dev: sample_std_dev(days)?,
            recent,
            count: days.len(),
        })
    }

    fn magnitude_stats(&self, events: &[Event]) -> Option<MagnitudeStats> {
        let mags: Vec<f64> = events.iter().map(|e| e.magnitude).collect();
        let slope = ols_slope(&mags).unwrap_or(0.0);
        let trend = if slope > self.trend_dead_zone {
            MagnitudeTrend::Increasing
        } else if slope < -self.trend_dead_zone {
            MagnitudeTrend::Decreasing
        } else {
            MagnitudeTrend::Stable
        };
        Some(MagnitudeStats {
            min: mags.iter().copied().reduce(f64::min)?,
            max: mags.iter().copied().reduce(f64::max)?,
            mean: mean(&mags)?,
            std_dev: sample_std_dev(&mags)?,
            slope,
            trend,
            major_count: mags.iter().filter(|m| **m >= self.major_magnitude).count(),
        })
    }

    fn depth_stats(&self, events: &[Event]) -> Option<DepthStats> {
        let depths: Vec<f64> = events.iter().map(|e| e.depth).collect();
        let shallow_count = depths.iter().filter(|d| **d < self.shallow_depth_km).count();
        Some(DepthStats {
            mean: mean(&depths)?,
            std_dev: sample_std_dev(&depths)?,
            shallow_ratio: shallow_count as f64 / depths.len() as f64,
            shallow_count,
            deep_count: depths.len() - shallow_count,
        })
    }

    fn recent_location(&self, events: &[Event]) -> Option<RecentLocation> {
        let start = events.len().saturating_sub(self.recent_window);
        let tail = &events[start..];
        let lats: Vec<f64> = tail.iter().map(|e| e.latitude).collect();
        let lons: Vec<f64> = tail.iter().map(|e| e.longitude).collect();
        let depths: Vec<f64> = tail.iter().map(|e| e.depth).collect();
        Some(RecentLocation {
            latitude: mean(&lats)?,
            longitude: mean(&lons)?,
            depth: mean(&depths)?,
        })
    }
}

impl Default for SeismicPatternAnalyzer {
    fn default() -> Self {
        Self {
            shallow_depth_km: 70.0,
            trend_dead_zone: 0.005,
            recent_window: 5,
            major_magnitude: 5.0,
        }
    }
}

impl PatternAnalyzer for SeismicPatternAnalyzer {
    fn analyze(&self, cleaned: &CleanedSeries) -> PatternSummary {
        let events = cleaned.events.events();
        let sample_count = events.len();

        let intervals = if sample_count >= 2 {
            self.interval_stats(cleaned.intervals.values())
        } else {
            None
        };

        let first_event = cleaned.events.first().map(|e| e.timestamp);
        let last_event = cleaned.events.last().map(|e| e.timestamp);
        let time_span_years = match (first_event, last_event) {
            (Some(first), Some(last)) => (last - first).num_milliseconds() as f64 / MILLIS_PER_YEAR,
            _ => 0.0,
        };

        let summary = PatternSummary {
            sample_count,
            intervals,
            seasonal: monthly_distribution(&cleaned.events),
            magnitude: self.magnitude_stats(events),
            depth: self.depth_stats(events),
            first_event,
            last_event,
            time_span_years,
            removed_outliers: cleaned.removed_intervals,
            recent_location: self.recent_location(events),
        };

        debug!(
            samples = sample_count,
            median_days = summary.intervals.map(|s| s.median),
            seasonal_strength = summary.seasonal.strength,
            "Analyzed pattern"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use quake_spi::{EventSeries, IntervalSet};

    fn cleaned(events: Vec<Event>) -> CleanedSeries {
        CleanedSeries::from_series(EventSeries::new(events))
    }

    fn yearly(n: usize, magnitude: impl Fn(usize) -> f64, depth: impl Fn(usize) -> f64) -> Vec<Event> {
        let base = Utc.with_ymd_and_hms(2000, 3, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                Event::new(
                    base + Duration::days(365 * i as i64),
                    38.0 + i as f64 * 0.1,
                    142.0,
                    depth(i),
                    magnitude(i),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_series() {
        let summary = SeismicPatternAnalyzer::default().analyze(&CleanedSeries::default());
        assert_eq!(summary, PatternSummary::empty());
    }

    #[test]
    fn test_single_event_has_no_interval_stats() {
        let summary = SeismicPatternAnalyzer::default().analyze(&cleaned(yearly(1, |_| 5.0, |_| 10.0)));
        assert_eq!(summary.sample_count, 1);
        assert!(summary.intervals.is_none());
        assert!(summary.magnitude.is_some());
        assert_eq!(summary.time_span_years, 0.0);
    }

    #[test]
    fn test_regular_series() {
        let summary = SeismicPatternAnalyzer::default()
            .analyze(&cleaned(yearly(10, |_| 5.0, |_| 10.0)));
        let stats = summary.intervals.unwrap();
        assert_eq!(stats.count, 9);
        assert_eq!(stats.median, 365.0);
        assert_eq!(stats.mean, 365.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.recent, Some(365.0));
        assert_eq!(summary.magnitude.unwrap().trend, MagnitudeTrend::Stable);
    }

    #[test]
    fn test_recent_uses_trailing_window() {
        let intervals = IntervalSet::new(vec![100.0, 100.0, 100.0, 10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        let mut input = cleaned(yearly(9, |_| 5.0, |_| 10.0));
        input.intervals = intervals;
        let stats = SeismicPatternAnalyzer::default().analyze(&input).intervals.unwrap();
        assert_eq!(stats.recent, Some(30.0));
    }

    #[test]
    fn test_single_interval_has_no_recent_estimate() {
        let stats = SeismicPatternAnalyzer::default()
            .analyze(&cleaned(yearly(2, |_| 5.0, |_| 10.0)))
            .intervals
            .unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.recent, None);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_magnitude_trend() {
        let analyzer = SeismicPatternAnalyzer::default();
        let rising = analyzer.analyze(&cleaned(yearly(6, |i| 4.0 + i as f64 * 0.2, |_| 10.0)));
        let m = rising.magnitude.unwrap();
        assert_eq!(m.trend, MagnitudeTrend::Increasing);
        assert!((m.slope - 0.2).abs() < 1e-9);
        assert_eq!(m.min, 4.0);
        assert!((m.max - 5.0).abs() < 1e-9);
        assert_eq!(m.major_count, 1);

        let falling = analyzer.analyze(&cleaned(yearly(6, |i| 6.0 - i as f64 * 0.1, |_| 10.0)));
        assert_eq!(falling.magnitude.unwrap().trend, MagnitudeTrend::Decreasing);

        let flat = analyzer.analyze(&cleaned(yearly(6, |i| 5.0 + i as f64 * 0.001, |_| 10.0)));
        assert_eq!(flat.magnitude.unwrap().trend, MagnitudeTrend::Stable);
    }

    #[test]
    fn test_depth_stats() {
        let summary = SeismicPatternAnalyzer::default()
            .analyze(&cleaned(yearly(4, |_| 5.0, |i| [10.0, 30.0, 70.0, 150.0][i])));
        let d = summary.depth.unwrap();
        assert_eq!(d.shallow_count, 2);
        assert_eq!(d.deep_count, 2);
        assert_eq!(d.shallow_ratio, 0.5);
        assert_eq!(d.mean, 65.0);
    }

    #[test]
    fn test_recent_location_and_span() {
        let summary = SeismicPatternAnalyzer::default()
            .analyze(&cleaned(yearly(7, |_| 5.0, |i| i as f64)));
        let loc = summary.recent_location.unwrap();
        // Trailing five events: indices 2..=6
        assert!((loc.latitude - 38.4).abs() < 1e-9);
        assert_eq!(loc.depth, 4.0);
        assert!((summary.time_span_years - 6.0 * 365.0 / 365.25).abs() < 1e-9);
    }

    #[test]
    fn test_removed_outliers_carried_over() {
        let mut input = cleaned(yearly(5, |_| 5.0, |_| 10.0));
        input.removed_intervals = 2;
        assert_eq!(SeismicPatternAnalyzer::default().analyze(&input).removed_outliers, 2);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(SeismicPatternAnalyzer::new(0.0, 0.005, 5, 5.0).is_err());
        assert!(SeismicPatternAnalyzer::new(70.0, -1.0, 5, 5.0).is_err());
        assert!(SeismicPatternAnalyzer::new(70.0, 0.005, 0, 5.0).is_err());
        assert!(SeismicPatternAnalyzer::new(70.0, 0.005, 5, f64::NAN).is_err());
        assert!(SeismicPatternAnalyzer::new(70.0, 0.005, 5, 5.0).is_ok());
    }
}
