//! Catalog data-quality assessment
//!
//! Diagnostic only; never folded into the confidence score.

use chrono::{DateTime, Utc};
use quake_spi::{DataQuality, PatternSummary};

/// Grade a summary's time span, volume, recency and magnitude range
pub fn assess(summary: &PatternSummary, now: DateTime<Utc>) -> DataQuality {
    let span = summary.time_span_years;
    let time_span_points = if span >= 50.0 {
        25
    } else if span >= 20.0 {
        20
    } else if span >= 10.0 {
        15
    } else {
        10
    };

    let volume_points = match summary.sample_count {
        n if n >= 100 => 25,
        n if n >= 50 => 20,
        n if n >= 20 => 15,
        _ => 10,
    };

    let recency_points = match summary.last_event.map(|t| (now - t).num_days()) {
        Some(d) if d <= 365 => 25,
        Some(d) if d <= 1825 => 20,
        Some(d) if d <= 3650 => 15,
        _ => 5,
    };

    let range = summary.magnitude.map_or(0.0, |m| m.max - m.min);
    let magnitude_range_points = if range >= 3.0 {
        25
    } else if range >= 2.0 {
        20
    } else if range >= 1.0 {
        15
    } else {
        10
    };

    DataQuality {
        time_span_points,
        volume_points,
        recency_points,
        magnitude_range_points,
        score: time_span_points + volume_points + recency_points + magnitude_range_points,
    }
}
