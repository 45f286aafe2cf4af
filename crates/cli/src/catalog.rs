//! CSV catalog loading

use crate::CliResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quake_facade::Event;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Depth assumed when a row leaves it blank
const DEFAULT_DEPTH_KM: f64 = 10.0;

/// Accepted header names per required column
const REQUIRED_COLUMNS: [&[&str]; 3] = [
    &["time", "timestamp", "date"],
    &["latitude", "lat"],
    &["longitude", "lon", "lng"],
];

/// Header groups that map onto a single row field; at most one per file
const ALIASED_COLUMNS: [&[&str]; 4] = [
    REQUIRED_COLUMNS[0],
    REQUIRED_COLUMNS[1],
    REQUIRED_COLUMNS[2],
    &["magnitude", "mag"],
];

/// One catalog row; unknown columns are ignored
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "timestamp", alias = "date")]
    time: String,
    #[serde(alias = "lat")]
    latitude: String,
    #[serde(alias = "lon", alias = "lng")]
    longitude: String,
    #[serde(default)]
    depth: Option<String>,
    #[serde(default, alias = "mag")]
    magnitude: Option<String>,
}

/// Events read from a CSV file
#[derive(Debug, Default)]
pub struct Catalog {
    pub events: Vec<Event>,
    /// Rows that could not be turned into an event at all
    pub skipped: usize,
}

pub fn load_catalog(path: &Path) -> CliResult<Catalog> {
    let file = File::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    let catalog = read_catalog(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        events = catalog.events.len(),
        skipped = catalog.skipped,
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Parse catalog rows.
///
/// Rows without a readable time are skipped. Unreadable numbers become NaN
/// so the event filter counts them as malformed; a blank depth becomes 10 km.
pub fn read_catalog<R: Read>(reader: R) -> CliResult<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();
    for names in ALIASED_COLUMNS {
        let present: Vec<&str> = headers.iter().filter(|h| names.contains(h)).collect();
        if present.len() > 1 {
            return Err(format!(
                "Ambiguous columns '{}': keep only one",
                present.join("', '")
            ));
        }
    }
    for names in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| names.contains(&h)) {
            return Err(format!("Missing required column '{}'", names[0]));
        }
    }

    let mut catalog = Catalog::default();
    for (line, row) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                debug!(row = line + 1, error = %e, "Skipping unreadable row");
                catalog.skipped += 1;
                continue;
            }
        };
        let Some(timestamp) = parse_timestamp(&row.time) else {
            debug!(row = line + 1, time = %row.time, "Skipping row without a valid time");
            catalog.skipped += 1;
            continue;
        };

        let depth = match row.depth.as_deref() {
            None | Some("") => DEFAULT_DEPTH_KM,
            Some(text) => parse_number(text),
        };
        catalog.events.push(Event::new(
            timestamp,
            parse_number(&row.latitude),
            parse_number(&row.longitude),
            depth,
            row.magnitude.as_deref().map_or(f64::NAN, parse_number),
        ));
    }

    if catalog.skipped > 0 {
        warn!(skipped = catalog.skipped, "Skipped catalog rows");
    }
    Ok(catalog)
}

fn parse_number(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// and bare dates (midnight UTC)
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2011, 3, 11, 5, 46, 24).unwrap();
        assert_eq!(parse_timestamp("2011-03-11T05:46:24Z"), Some(expected));
        assert_eq!(parse_timestamp("2011-03-11T14:46:24+09:00"), Some(expected));
        assert_eq!(parse_timestamp("2011-03-11 05:46:24"), Some(expected));
        assert_eq!(parse_timestamp("2011-03-11T05:46:24"), Some(expected));
        assert_eq!(
            parse_timestamp("2011-03-11"),
            Some(Utc.with_ymd_and_hms(2011, 3, 11, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_read_catalog() {
        let csv = "time,latitude,longitude,depth,mag,place\n\
                   2011-03-11T05:46:24Z,38.297,142.373,29.0,9.1,Tohoku\n\
                   2016-04-15 16:25:06,32.79,130.75,,7.0,Kumamoto\n\
                   not-a-date,35.0,139.0,10.0,5.0,Nowhere\n\
                   2020-01-01,35.0,139.0,10.0,,Blank\n";
        let catalog = read_catalog(csv.as_bytes()).unwrap();

        assert_eq!(catalog.events.len(), 3);
        assert_eq!(catalog.skipped, 1);
        assert_eq!(catalog.events[0].magnitude, 9.1);
        assert_eq!(catalog.events[1].depth, DEFAULT_DEPTH_KM);
        assert!(catalog.events[2].magnitude.is_nan());
    }

    #[test]
    fn test_non_numeric_coordinates_become_malformed() {
        let csv = "time,latitude,longitude,depth,magnitude\n2020-01-01,north,139.0,10.0,5.0\n";
        let catalog = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(catalog.events.len(), 1);
        assert!(!catalog.events[0].is_well_formed());
    }

    #[test]
    fn test_missing_column() {
        let err = read_catalog("time,latitude,depth\n".as_bytes()).unwrap_err();
        assert!(err.contains("longitude"));
    }

    #[test]
    fn test_duplicate_aliases_rejected() {
        let err = read_catalog("time,date,latitude,longitude\n".as_bytes()).unwrap_err();
        assert!(err.contains("'time', 'date'"));

        let err = read_catalog(
            "time,latitude,longitude,mag,magnitude\n2020-01-01,38,142,5.0,5.0\n".as_bytes(),
        )
        .unwrap_err();
        assert!(err.contains("Ambiguous"));
        assert!(err.contains("mag"));
    }
}
