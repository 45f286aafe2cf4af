//! Plain-text rendering of reports

use quake_facade::{ForecastReport, RegionAnalysis, RegionBounds, RegionRegistry};

pub fn regions(registry: &RegionRegistry) -> String {
    let mut out = format!("{} regions\n", registry.len());
    for region in registry.iter() {
        let extent = match &region.bounds {
            RegionBounds::BoundingBox {
                lat_range,
                lon_range,
            } => format!(
                "lat {}..{}, lon {}..{}",
                lat_range.0, lat_range.1, lon_range.0, lon_range.1
            ),
            RegionBounds::Polygon { vertices } => format!("polygon, {} vertices", vertices.len()),
        };
        let threshold = region
            .threshold
            .map(|t| format!(", M{:.1}+", t))
            .unwrap_or_default();
        out.push_str(&format!("  {:<16} {}{}\n", region.name, extent, threshold));
    }
    out
}

pub fn analysis(analysis: &RegionAnalysis) -> String {
    let s = &analysis.summary;
    let b = &analysis.breakdown;
    let f = &analysis.filter;

    let mut out = format!("{} (M{:.1}+)\n", analysis.display_name, analysis.threshold);
    out.push_str(&format!(
        "  Events: {} qualifying of {} ({} outside region, {} below threshold, {} malformed)\n",
        f.qualifying,
        f.total,
        f.outside_region,
        f.below_threshold,
        f.malformed_total()
    ));
    if let (Some(first), Some(last)) = (s.first_event, s.last_event) {
        out.push_str(&format!(
            "  Span: {} to {} ({:.1} years)\n",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            s.time_span_years
        ));
    }
    match s.intervals {
        Some(i) => out.push_str(&format!(
            "  Interval: median {:.1} d, mean {:.1} d, std {:.1} d, {} gaps ({} removed as outliers)\n",
            i.median, i.mean, i.std_dev, i.count, s.removed_outliers
        )),
        None => out.push_str("  Interval: not enough events\n"),
    }
    if let Some(m) = s.magnitude {
        out.push_str(&format!(
            "  Magnitude: {:.1}..{:.1}, mean {:.2}, trend {:?} ({} major)\n",
            m.min, m.max, m.mean, m.trend, m.major_count
        ));
    }
    if let Some(d) = s.depth {
        out.push_str(&format!(
            "  Depth: mean {:.1} km, std {:.1} km, {:.0}% shallow\n",
            d.mean,
            d.std_dev,
            d.shallow_ratio * 100.0
        ));
    }
    if !s.seasonal.peak_months.is_empty() {
        out.push_str(&format!(
            "  Seasonality: strength {:.2}, peak months {:?}\n",
            s.seasonal.strength, s.seasonal.peak_months
        ));
    }

    out.push_str(&format!(
        "  Confidence: {:.1}% (volume {:.1}, regularity {:.1}, recency {:.1}, seasonal {:.1}, geographic {:.1})\n",
        b.score(),
        b.data_volume(),
        b.pattern_regularity(),
        b.data_recency(),
        b.seasonal_strength(),
        b.geographic_consistency()
    ));
    out.push_str(&format!("  Data quality: {}/100\n", analysis.quality.score));

    let a = &analysis.activity;
    out.push_str(&format!(
        "  Last {} days: {} events, {} significant\n",
        a.window_days, a.total_events, a.significant_events
    ));
    out
}

pub fn report(report: &ForecastReport) -> String {
    let p = &report.prediction;
    let mut out = analysis(&report.analysis);
    out.push_str(&format!(
        "  Next event: {} (window {} to {})\n",
        p.predicted_date.format("%Y-%m-%d"),
        p.window_start.format("%Y-%m-%d"),
        p.window_end.format("%Y-%m-%d")
    ));
    out.push_str(&format!(
        "  Magnitude {:.1} ({}), at {:.2}, {:.2}, depth {:.0} km\n",
        p.magnitude,
        p.risk_level.label(),
        p.location.latitude,
        p.location.longitude,
        p.depth_km
    ));
    out.push_str(&format!(
        "  Cycle {:.1} years, {} days since last event, {:?} pattern, {:?} zone\n",
        p.expected_interval_years, p.days_since_last, p.pattern_strength, p.zone
    ));
    out
}
