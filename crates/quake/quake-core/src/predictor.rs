//! Interval-based next-event predictor

use chrono::{DateTime, Duration, Utc};
use quake_spi::{
    GeoPoint, MagnitudeTrend, PatternSummary, Predictor, Projection, QuakeError,
    RegionDefinition, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Shortest step the predictor advances by
const MIN_STEP_MILLIS: i64 = 1_000;
/// Depth assumed when the summary carries none
const FALLBACK_DEPTH_KM: f64 = 10.0;
const MAX_UNCERTAINTY_FACTOR: f64 = 0.3;
const FLAT_UNCERTAINTY_FACTOR: f64 = 0.2;

/// Where the predicted epicenter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStrategy {
    /// Mean of the trailing events, falling back to the region centroid
    #[default]
    RecentEvents,
    /// Always the region centroid
    RegionCentroid,
}

/// Projects the next event one weighted interval after the last one,
/// advancing whole intervals until the date lies in the future.
#[derive(Debug, Clone)]
pub struct IntervalPredictor {
    recent_weight: f64,
    location: LocationStrategy,
}

impl IntervalPredictor {
    /// Create a new predictor
    ///
    /// # Arguments
    ///
    /// * `recent_weight` - share of the recent-interval estimate in the
    ///   weighted interval, in [0, 1]
    /// * `location` - epicenter strategy
    pub fn new(recent_weight: f64, location: LocationStrategy) -> Result<Self> {
        if !(0.0..=1.0).contains(&recent_weight) {
            return Err(QuakeError::invalid_parameter(
                "recent_weight",
                "must be between 0 and 1",
            ));
        }
        Ok(Self {
            recent_weight,
            location,
        })
    }

    pub fn recent_weight(&self) -> f64 {
        self.recent_weight
    }

    pub fn location_strategy(&self) -> LocationStrategy {
        self.location
    }

    fn magnitude(&self, summary: &PatternSummary) -> Option<f64> {
        let stats = summary.magnitude?;
        let projected = match stats.trend {
            MagnitudeTrend::Stable => stats.mean,
            // Fitted line evaluated at the next index
            _ => stats.mean + stats.slope * (summary.sample_count as f64 + 1.0) / 2.0,
        };
        Some(projected.clamp(stats.min, stats.max))
    }

    fn location(&self, summary: &PatternSummary, region: &RegionDefinition) -> GeoPoint {
        match (self.location, summary.recent_location) {
            (LocationStrategy::RecentEvents, Some(recent)) => {
                GeoPoint::new(recent.latitude, recent.longitude)
            }
            _ => region.centroid(),
        }
    }
}

impl Default for IntervalPredictor {
    fn default() -> Self {
        Self {
            recent_weight: 0.4,
            location: LocationStrategy::RecentEvents,
        }
    }
}

impl Predictor for IntervalPredictor {
    fn project(
        &self,
        summary: &PatternSummary,
        region: &RegionDefinition,
        now: DateTime<Utc>,
    ) -> Result<Projection> {
        let insufficient = || QuakeError::InsufficientData {
            region: region.name.clone(),
            required: 2,
            actual: summary.sample_count,
        };
        let stats = summary.intervals.ok_or_else(insufficient)?;
        let last_event = summary.last_event.ok_or_else(insufficient)?;
        let magnitude = self.magnitude(summary).ok_or_else(insufficient)?;

        let weighted = match stats.recent {
            Some(recent) => self.recent_weight * recent + (1.0 - self.recent_weight) * stats.median,
            None => stats.median,
        };
        if !weighted.is_finite() {
            return Err(QuakeError::Numerical(format!(
                "weighted interval is not finite: {}",
                weighted
            )));
        }

        let step_millis = ((weighted * MILLIS_PER_DAY).round() as i64).max(MIN_STEP_MILLIS);
        let mut predicted = advance(last_event, step_millis, 1)?;
        let mut cycles_advanced = 0;
        if predicted <= now {
            let deficit = (now - predicted).num_milliseconds();
            let cycles = deficit / step_millis + 1;
            predicted = advance(predicted, step_millis, cycles)?;
            cycles_advanced = cycles as u64;
        }

        let factor = if stats.std_dev > 0.0 {
            stats
                .coefficient_of_variation()
                .map_or(FLAT_UNCERTAINTY_FACTOR, |cv| cv.min(MAX_UNCERTAINTY_FACTOR))
        } else {
            FLAT_UNCERTAINTY_FACTOR
        };
        let spread = Duration::milliseconds((weighted * factor * MILLIS_PER_DAY).round() as i64);
        let window_start = predicted
            .checked_sub_signed(spread)
            .map_or(now, |start| start.max(now));
        let window_end = predicted.checked_add_signed(spread).unwrap_or(predicted);

        let depth_km = summary
            .recent_location
            .map(|r| r.depth)
            .or_else(|| summary.depth.map(|d| d.mean))
            .unwrap_or(FALLBACK_DEPTH_KM);

        debug!(
            region = %region.name,
            weighted_days = weighted,
            cycles_advanced,
            "Projected next event"
        );

        Ok(Projection {
            predicted_date: predicted,
            window_start,
            window_end,
            magnitude,
            location: self.location(summary, region),
            depth_km,
            weighted_interval_days: weighted,
            cycles_advanced,
            last_event,
            days_since_last: (now - last_event).num_days(),
        })
    }
}

/// `from + cycles * step_millis`, failing instead of overflowing
fn advance(from: DateTime<Utc>, step_millis: i64, cycles: i64) -> Result<DateTime<Utc>> {
    step_millis
        .checked_mul(cycles)
        .and_then(Duration::try_milliseconds)
        .and_then(|d| from.checked_add_signed(d))
        .ok_or_else(|| QuakeError::Numerical("predicted date out of range".to_string()))
}
