//! Confidence breakdown model
//!
//! Five capped sub-scores sum to a raw total in [0, 100], which is mapped
//! linearly onto [`CONFIDENCE_FLOOR`, `CONFIDENCE_CEILING`]. The final score
//! is only reachable through [`ConfidenceBreakdown::from_sub_scores`].

use serde::Serialize;

/// Lowest reportable confidence
pub const CONFIDENCE_FLOOR: f64 = 35.0;
/// Highest reportable confidence
pub const CONFIDENCE_CEILING: f64 = 85.0;

pub const DATA_VOLUME_CAP: f64 = 25.0;
pub const PATTERN_REGULARITY_CAP: f64 = 25.0;
pub const DATA_RECENCY_CAP: f64 = 20.0;
pub const SEASONAL_STRENGTH_CAP: f64 = 15.0;
pub const GEOGRAPHIC_CONSISTENCY_CAP: f64 = 15.0;

/// Per-factor confidence points and the rescaled score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceBreakdown {
    data_volume: f64,
    pattern_regularity: f64,
    data_recency: f64,
    seasonal_strength: f64,
    geographic_consistency: f64,
    raw_total: f64,
    score: f64,
}

impl ConfidenceBreakdown {
    /// Cap every sub-score to its range, sum, and rescale.
    ///
    /// Non-finite inputs count as zero points.
    pub fn from_sub_scores(
        data_volume: f64,
        pattern_regularity: f64,
        data_recency: f64,
        seasonal_strength: f64,
        geographic_consistency: f64,
    ) -> Self {
        let data_volume = cap(data_volume, DATA_VOLUME_CAP);
        let pattern_regularity = cap(pattern_regularity, PATTERN_REGULARITY_CAP);
        let data_recency = cap(data_recency, DATA_RECENCY_CAP);
        let seasonal_strength = cap(seasonal_strength, SEASONAL_STRENGTH_CAP);
        let geographic_consistency = cap(geographic_consistency, GEOGRAPHIC_CONSISTENCY_CAP);

        let raw_total = data_volume
            + pattern_regularity
            + data_recency
            + seasonal_strength
            + geographic_consistency;

        Self {
            data_volume,
            pattern_regularity,
            data_recency,
            seasonal_strength,
            geographic_consistency,
            raw_total,
            score: rescale(raw_total),
        }
    }

    pub fn data_volume(&self) -> f64 {
        self.data_volume
    }

    pub fn pattern_regularity(&self) -> f64 {
        self.pattern_regularity
    }

    pub fn data_recency(&self) -> f64 {
        self.data_recency
    }

    pub fn seasonal_strength(&self) -> f64 {
        self.seasonal_strength
    }

    pub fn geographic_consistency(&self) -> f64 {
        self.geographic_consistency
    }

    /// Sum of the capped sub-scores, in [0, 100]
    pub fn raw_total(&self) -> f64 {
        self.raw_total
    }

    /// Final confidence, in [35, 85]
    pub fn score(&self) -> f64 {
        self.score
    }
}

fn cap(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Map a raw total in [0, 100] onto [35, 85]
pub fn rescale(raw_total: f64) -> f64 {
    let raw = raw_total.clamp(0.0, 100.0);
    CONFIDENCE_FLOOR + (raw / 100.0) * (CONFIDENCE_CEILING - CONFIDENCE_FLOOR)
}
