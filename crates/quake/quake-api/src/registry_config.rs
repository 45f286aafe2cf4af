//! Region table configuration

use quake_core::{GeoPoint, QuakeError, RegionDefinition, RegionRegistry, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTIN_REGIONS: &str = include_str!("regions.toml");

/// One `[[regions]]` entry.
///
/// Give either `lat_range` and `lon_range`, or `polygon` as `[lat, lon]`
/// vertex pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<(f64, f64)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// `[lat, lon]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<(f64, f64)>,
}

impl RegionConfig {
    pub fn to_definition(&self) -> Result<RegionDefinition> {
        let mut region = match (&self.lat_range, &self.lon_range, &self.polygon) {
            (Some(lat), Some(lon), None) => RegionDefinition::bounding_box(&self.name, *lat, *lon),
            (None, None, Some(vertices)) => RegionDefinition::polygon(
                &self.name,
                vertices.iter().map(|(lat, lon)| GeoPoint::new(*lat, *lon)).collect(),
            ),
            _ => {
                return Err(QuakeError::Config(format!(
                    "region '{}': give lat_range and lon_range, or polygon",
                    self.name
                )))
            }
        };

        if let Some(display_name) = &self.display_name {
            region = region.with_display_name(display_name);
        }
        if let Some(threshold) = self.threshold {
            region = region.with_threshold(threshold);
        }
        if let Some((lat, lon)) = self.centroid {
            region = region.with_centroid(GeoPoint::new(lat, lon));
        }
        Ok(region)
    }
}

/// A list of region entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

impl RegistryConfig {
    /// The sixteen bundled regions
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_REGIONS)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| QuakeError::Config(e.to_string()))
    }

    /// Validate every entry and build the registry
    pub fn into_registry(self) -> Result<RegionRegistry> {
        let definitions = self
            .regions
            .iter()
            .map(RegionConfig::to_definition)
            .collect::<Result<Vec<_>>>()?;
        debug!(regions = definitions.len(), "Loaded region table");
        RegionRegistry::new(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let registry = RegistryConfig::builtin().unwrap().into_registry().unwrap();
        assert_eq!(registry.len(), 16);

        let california = registry.get("USA-California").unwrap();
        assert_eq!(california.label(), "California, USA");
        assert!(california.contains(34.05, -118.25));

        let russia = registry.get("russia").unwrap();
        assert!(russia.contains(53.0, 158.6));
    }

    #[test]
    fn test_polygon_entry() {
        let config = RegistryConfig::from_toml_str(
            r#"
            [[regions]]
            name = "Aegean"
            polygon = [[35.0, 22.0], [41.0, 22.0], [41.0, 28.0], [35.0, 28.0]]
            threshold = 4.5
            centroid = [38.5, 25.0]
            "#,
        )
        .unwrap();
        let registry = config.into_registry().unwrap();
        let aegean = registry.get("Aegean").unwrap();
        assert!(aegean.contains(38.0, 25.0));
        assert!(!aegean.contains(38.0, 30.0));
        assert_eq!(aegean.threshold, Some(4.5));
        assert_eq!(aegean.centroid(), GeoPoint::new(38.5, 25.0));
    }

    #[test]
    fn test_entry_without_bounds() {
        let config = RegistryConfig::from_toml_str(
            r#"
            [[regions]]
            name = "Nowhere"
            lat_range = [0.0, 1.0]
            "#,
        )
        .unwrap();
        let err = config.into_registry().unwrap_err();
        assert!(err.to_string().contains("Nowhere"));
    }

    #[test]
    fn test_duplicate_entries() {
        let config = RegistryConfig::from_toml_str(
            r#"
            [[regions]]
            name = "Italy"
            lat_range = [36.0, 47.0]
            lon_range = [6.0, 19.0]

            [[regions]]
            name = "Italy"
            lat_range = [36.0, 47.0]
            lon_range = [6.0, 19.0]
            "#,
        )
        .unwrap();
        assert!(matches!(config.into_registry(), Err(QuakeError::Config(_))));
    }
}
