//! Five-factor confidence scoring
//!
//! Each factor is computed independently from the pattern summary, capped,
//! summed and rescaled onto [35, 85] by [`ConfidenceBreakdown::from_sub_scores`].

use chrono::{DateTime, Utc};
use quake_spi::model::{
    DATA_RECENCY_CAP, DATA_VOLUME_CAP, GEOGRAPHIC_CONSISTENCY_CAP, PATTERN_REGULARITY_CAP,
    SEASONAL_STRENGTH_CAP,
};
use quake_spi::{ConfidenceBreakdown, ConfidenceScorer, PatternSummary, QuakeError, Result};

/// Scores a pattern summary on volume, regularity, recency, seasonality
/// and depth clustering.
#[derive(Debug, Clone)]
pub struct FiveFactorScorer {
    volume_saturation: usize,
    depth_spread_scale_km: f64,
}

impl FiveFactorScorer {
    /// Create a new scorer
    ///
    /// # Arguments
    ///
    /// * `volume_saturation` - sample count at which data volume earns full points
    /// * `depth_spread_scale_km` - depth std-dev at which geographic consistency
    ///   earns half points
    pub fn new(volume_saturation: usize, depth_spread_scale_km: f64) -> Result<Self> {
        if volume_saturation == 0 {
            return Err(QuakeError::invalid_parameter(
                "volume_saturation",
                "must be at least 1",
            ));
        }
        if !depth_spread_scale_km.is_finite() || depth_spread_scale_km <= 0.0 {
            return Err(QuakeError::invalid_parameter(
                "depth_spread_scale_km",
                "must be positive",
            ));
        }
        Ok(Self {
            volume_saturation,
            depth_spread_scale_km,
        })
    }

    pub fn data_volume(&self, sample_count: usize) -> f64 {
        let ratio = sample_count as f64 / self.volume_saturation as f64;
        DATA_VOLUME_CAP * ratio.min(1.0)
    }

    pub fn geographic_consistency(&self, summary: &PatternSummary) -> f64 {
        match summary.depth {
            Some(depth) => {
                GEOGRAPHIC_CONSISTENCY_CAP / (1.0 + depth.std_dev / self.depth_spread_scale_km)
            }
            None => 0.0,
        }
    }
}

impl Default for FiveFactorScorer {
    fn default() -> Self {
        Self {
            volume_saturation: 50,
            depth_spread_scale_km: 50.0,
        }
    }
}

/// Points for the interval coefficient of variation
pub fn pattern_regularity(summary: &PatternSummary) -> f64 {
    let Some(stats) = summary.intervals else {
        return 0.0;
    };
    if stats.count == 1 {
        return 15.0;
    }
    match stats.coefficient_of_variation() {
        Some(cv) if cv < 0.2 => PATTERN_REGULARITY_CAP,
        Some(cv) if cv < 0.4 => 20.0,
        Some(cv) if cv < 0.6 => 15.0,
        Some(cv) if cv < 1.0 => 10.0,
        Some(_) => 5.0,
        None => 0.0,
    }
}

/// Points for the age of the latest event relative to `now`
pub fn data_recency(summary: &PatternSummary, now: DateTime<Utc>) -> f64 {
    let Some(last) = summary.last_event else {
        return 0.0;
    };
    let days = (now - last).num_days().max(0);
    match days {
        d if d < 365 => DATA_RECENCY_CAP,
        d if d < 1825 => 15.0,
        d if d < 3650 => 10.0,
        d if d < 7300 => 5.0,
        _ => 0.0,
    }
}

/// Points proportional to seasonal strength
pub fn seasonal_strength(summary: &PatternSummary) -> f64 {
    SEASONAL_STRENGTH_CAP * summary.seasonal.strength
}

impl ConfidenceScorer for FiveFactorScorer {
    fn score(&self, summary: &PatternSummary, now: DateTime<Utc>) -> ConfidenceBreakdown {
        // Fewer than two events carry no pattern; score the floor
        if !summary.has_interval_stats() {
            return ConfidenceBreakdown::from_sub_scores(0.0, 0.0, 0.0, 0.0, 0.0);
        }
        ConfidenceBreakdown::from_sub_scores(
            self.data_volume(summary.sample_count),
            pattern_regularity(summary),
            data_recency(summary, now),
            seasonal_strength(summary),
            self.geographic_consistency(summary),
        )
    }
}
