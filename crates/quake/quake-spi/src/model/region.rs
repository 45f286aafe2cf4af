//! Region definition model

use serde::{Deserialize, Serialize};

/// Magnitude at or above which an event counts as significant
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 4.0;

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geographic extent of a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionBounds {
    /// Inclusive latitude/longitude box
    BoundingBox {
        lat_range: (f64, f64),
        lon_range: (f64, f64),
    },
    /// Closed polygon, vertices in order; the closing edge is implicit
    Polygon { vertices: Vec<GeoPoint> },
}

impl RegionBounds {
    /// Whether the coordinate falls inside the bounds
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        match self {
            RegionBounds::BoundingBox {
                lat_range,
                lon_range,
            } => {
                latitude >= lat_range.0
                    && latitude <= lat_range.1
                    && longitude >= lon_range.0
                    && longitude <= lon_range.1
            }
            RegionBounds::Polygon { vertices } => polygon_contains(vertices, latitude, longitude),
        }
    }

    /// Geometric center: box midpoint or vertex mean
    pub fn center(&self) -> GeoPoint {
        match self {
            RegionBounds::BoundingBox {
                lat_range,
                lon_range,
            } => GeoPoint::new(
                (lat_range.0 + lat_range.1) / 2.0,
                (lon_range.0 + lon_range.1) / 2.0,
            ),
            RegionBounds::Polygon { vertices } => {
                if vertices.is_empty() {
                    return GeoPoint::new(0.0, 0.0);
                }
                let n = vertices.len() as f64;
                GeoPoint::new(
                    vertices.iter().map(|v| v.latitude).sum::<f64>() / n,
                    vertices.iter().map(|v| v.longitude).sum::<f64>() / n,
                )
            }
        }
    }
}

/// Even-odd ray casting with longitude as x and latitude as y
fn polygon_contains(vertices: &[GeoPoint], latitude: f64, longitude: f64) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].longitude, vertices[i].latitude);
        let (xj, yj) = (vertices[j].longitude, vertices[j].latitude);
        if (yi > latitude) != (yj > latitude) {
            let x_cross = (xj - xi) * (latitude - yi) / (yj - yi) + xi;
            if longitude < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A named region of the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    /// Lookup key
    pub name: String,
    /// Human readable label, e.g. "California, USA"
    pub display_name: Option<String>,
    /// Extent used by the event filter
    pub bounds: RegionBounds,
    /// Significance threshold override
    pub threshold: Option<f64>,
    /// Explicit centroid; derived from the bounds when absent
    pub centroid: Option<GeoPoint>,
}

impl RegionDefinition {
    /// Create a region from an inclusive latitude/longitude box.
    pub fn bounding_box(name: &str, lat_range: (f64, f64), lon_range: (f64, f64)) -> Self {
        Self {
            name: name.to_string(),
            display_name: None,
            bounds: RegionBounds::BoundingBox {
                lat_range,
                lon_range,
            },
            threshold: None,
            centroid: None,
        }
    }

    /// Create a region from polygon vertices.
    pub fn polygon(name: &str, vertices: Vec<GeoPoint>) -> Self {
        Self {
            name: name.to_string(),
            display_name: None,
            bounds: RegionBounds::Polygon { vertices },
            threshold: None,
            centroid: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    pub fn with_centroid(mut self, centroid: GeoPoint) -> Self {
        self.centroid = Some(centroid);
        self
    }

    /// Whether the coordinate falls inside the region
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.bounds.contains(latitude, longitude)
    }

    /// Configured centroid, or the center of the bounds
    pub fn centroid(&self) -> GeoPoint {
        self.centroid.unwrap_or_else(|| self.bounds.center())
    }

    /// Region threshold, falling back to `default`
    pub fn significance_threshold(&self, default: f64) -> f64 {
        self.threshold.unwrap_or(default)
    }

    /// Display name when set, otherwise the lookup name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
