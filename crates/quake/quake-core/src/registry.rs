//! Named region lookup

use quake_spi::{QuakeError, RegionBounds, RegionDefinition, Result};

/// Immutable set of region definitions, looked up by name
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<RegionDefinition>,
}

impl RegionRegistry {
    /// Build a registry, rejecting blank, duplicate or inverted definitions.
    ///
    /// Names must be unique ignoring case, since lookups fall back to a
    /// case-insensitive match.
    pub fn new(regions: Vec<RegionDefinition>) -> Result<Self> {
        for (i, region) in regions.iter().enumerate() {
            validate(region)?;
            if regions[..i]
                .iter()
                .any(|r| r.name.eq_ignore_ascii_case(&region.name))
            {
                return Err(QuakeError::Config(format!(
                    "duplicate region '{}'",
                    region.name
                )));
            }
        }
        Ok(Self { regions })
    }

    /// Exact name first, then a case-insensitive match
    pub fn get(&self, name: &str) -> Result<&RegionDefinition> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .or_else(|| self.regions.iter().find(|r| r.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| QuakeError::InvalidRegion {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionDefinition> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn validate(region: &RegionDefinition) -> Result<()> {
    let fail = |reason: &str| Err(QuakeError::Config(format!("region '{}': {}", region.name, reason)));

    if region.name.trim().is_empty() {
        return Err(QuakeError::Config("region name must not be empty".to_string()));
    }
    if let Some(threshold) = region.threshold {
        if !threshold.is_finite() {
            return fail("threshold must be finite");
        }
    }
    match &region.bounds {
        RegionBounds::BoundingBox {
            lat_range,
            lon_range,
        } => {
            if !(-90.0..=90.0).contains(&lat_range.0)
                || !(-90.0..=90.0).contains(&lat_range.1)
                || lat_range.0 > lat_range.1
            {
                return fail("lat_range must be an ascending pair within -90..90");
            }
            if !(-180.0..=180.0).contains(&lon_range.0)
                || !(-180.0..=180.0).contains(&lon_range.1)
                || lon_range.0 > lon_range.1
            {
                return fail("lon_range must be an ascending pair within -180..180");
            }
        }
        RegionBounds::Polygon { vertices } => {
            if vertices.len() < 3 {
                return fail("polygon needs at least 3 vertices");
            }
        }
    }
    Ok(())
}
