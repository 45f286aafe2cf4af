//! Recent activity summary for a region

use chrono::{DateTime, Duration, Utc};
use quake_spi::{Event, RecentActivity, RegionDefinition};

/// Trailing window used by the engine
pub const DEFAULT_ACTIVITY_WINDOW_DAYS: i64 = 365;

/// Summarize in-region activity over `window_days` before `now`.
///
/// Window counts include events of any magnitude; the latest significant
/// event is searched over the whole catalog. Malformed records and events
/// after `now` are ignored.
pub fn recent_activity(
    catalog: &[Event],
    region: &RegionDefinition,
    threshold: f64,
    now: DateTime<Utc>,
    window_days: i64,
) -> RecentActivity {
    let window_start = now - Duration::days(window_days);
    let mut activity = RecentActivity {
        window_days,
        ..Default::default()
    };

    let in_region = catalog.iter().filter(|e| {
        e.is_well_formed() && e.timestamp <= now && region.contains(e.latitude, e.longitude)
    });

    for event in in_region {
        let significant = event.magnitude >= threshold;
        if event.timestamp > window_start {
            activity.total_events += 1;
            if significant {
                activity.significant_events += 1;
            }
            if activity.latest_event.map_or(true, |l| event.timestamp > l.timestamp) {
                activity.latest_event = Some(*event);
            }
        }
        if significant
            && activity
                .latest_significant
                .map_or(true, |l| event.timestamp > l.timestamp)
        {
            activity.latest_significant = Some(*event);
        }
    }

    activity.days_since_latest = activity.latest_event.map(|e| (now - e.timestamp).num_days());
    activity.days_since_significant = activity
        .latest_significant
        .map(|e| (now - e.timestamp).num_days());
    activity
}
