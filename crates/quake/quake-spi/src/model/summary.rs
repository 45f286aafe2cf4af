//! Pattern summary model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temporal consistency assigned to gaps with zero standard deviation
pub const ZERO_SPREAD_CONSISTENCY: f64 = 0.8;

/// Statistics of the retained inter-event gaps (days)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalStats {
    /// Canonical prediction basis
    pub median: f64,
    pub mean: f64,
    /// Sample standard deviation; 0 for a single interval
    pub std_dev: f64,
    /// Mean of the trailing gaps; `None` when only one gap exists
    pub recent: Option<f64>,
    pub count: usize,
}

impl IntervalStats {
    /// `std_dev / mean`; `None` for a single gap or a zero mean
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.count < 2 || self.mean <= 0.0 {
            None
        } else {
            Some(self.std_dev / self.mean)
        }
    }

    /// `1 - cv`, the temporal consistency of the series.
    ///
    /// Gaps without any spread, a single gap included, count as
    /// [`ZERO_SPREAD_CONSISTENCY`].
    pub fn temporal_consistency(&self) -> Option<f64> {
        if self.count >= 1 && self.mean > 0.0 && self.std_dev == 0.0 {
            return Some(ZERO_SPREAD_CONSISTENCY);
        }
        self.coefficient_of_variation().map(|cv| 1.0 - cv)
    }
}

/// Meteorological season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    pub fn months(&self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
        }
    }
}

/// Distribution of events over calendar months
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalDistribution {
    /// Event count per month, January first
    pub counts: [usize; 12],
    /// Counts normalized to sum to 1 (all zero for an empty series)
    pub frequencies: [f64; 12],
    /// `(max frequency - 1/12) / (1 - 1/12)`, in [0, 1]
    pub strength: f64,
    /// Months (1..=12) standing out from the rest
    pub peak_months: Vec<u32>,
    pub peak_season: Option<Season>,
    /// Share of events falling in the peak season
    pub peak_season_share: f64,
}

/// Direction of the magnitude trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Magnitude statistics of the cleaned series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// OLS slope of magnitude over event index
    pub slope: f64,
    pub trend: MagnitudeTrend,
    /// Events at or above the major magnitude
    pub major_count: usize,
}

/// Depth statistics of the cleaned series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthStats {
    pub mean: f64,
    pub std_dev: f64,
    /// Shallow events over total
    pub shallow_ratio: f64,
    pub shallow_count: usize,
    pub deep_count: usize,
}

/// Mean position of the trailing events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
}

/// Statistical digest of a cleaned event series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Events in the cleaned series
    pub sample_count: usize,
    /// `None` for series of 0 or 1 events
    pub intervals: Option<IntervalStats>,
    pub seasonal: SeasonalDistribution,
    pub magnitude: Option<MagnitudeStats>,
    pub depth: Option<DepthStats>,
    pub first_event: Option<DateTime<Utc>>,
    pub last_event: Option<DateTime<Utc>>,
    /// Years between the first and last event
    pub time_span_years: f64,
    /// Gaps dropped by outlier removal
    pub removed_outliers: usize,
    pub recent_location: Option<RecentLocation>,
}

impl PatternSummary {
    /// Summary of an empty series
    pub fn empty() -> Self {
        Self {
            sample_count: 0,
            intervals: None,
            seasonal: SeasonalDistribution::default(),
            magnitude: None,
            depth: None,
            first_event: None,
            last_event: None,
            time_span_years: 0.0,
            removed_outliers: 0,
            recent_location: None,
        }
    }

    /// Whether the summary supports an interval-based prediction
    pub fn has_interval_stats(&self) -> bool {
        self.intervals.is_some()
    }
}
