//! Engine configuration
//!
//! Every section and field has a default, so an empty TOML document is a
//! valid configuration.

use crate::registry_config::{RegionConfig, RegistryConfig};
use quake_core::{LocationStrategy, QuakeError, Result, DEFAULT_SIGNIFICANCE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the event filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Significance threshold for regions without an override
    pub default_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

/// Configuration for interval outlier removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// IQR fence multiplier
    pub iqr_multiplier: f64,
    /// Shorter interval sets are left untouched
    pub min_intervals: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            min_intervals: 4,
        }
    }
}

/// Configuration for pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub shallow_depth_km: f64,
    /// Magnitude slopes within this band are stable
    pub trend_dead_zone: f64,
    /// Trailing intervals/events behind the recent estimates
    pub recent_window: usize,
    pub major_magnitude: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            shallow_depth_km: 70.0,
            trend_dead_zone: 0.005,
            recent_window: 5,
            major_magnitude: 5.0,
        }
    }
}

/// Configuration for the predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Weight of the recent-interval estimate, the median takes the rest
    pub recent_weight: f64,
    pub location: LocationStrategy,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            recent_weight: 0.4,
            location: LocationStrategy::RecentEvents,
        }
    }
}

/// Configuration for confidence scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Sample count that earns full data-volume points
    pub volume_saturation: usize,
    /// Depth spread at which geographic consistency is halved
    pub depth_spread_scale_km: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            volume_saturation: 50,
            depth_spread_scale_km: 50.0,
        }
    }
}

/// Tunables for every pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub filter: FilterConfig,
    pub outlier: OutlierConfig,
    pub analysis: AnalysisConfig,
    pub predictor: PredictorConfig,
    pub scoring: ScoringConfig,
}

/// Top-level configuration file: an `[engine]` table and `[[regions]]`.
///
/// An empty region list means the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuakeConfig {
    pub engine: EngineConfig,
    pub regions: Vec<RegionConfig>,
}

impl QuakeConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| QuakeError::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| QuakeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Configured regions, or the built-in table when none are listed
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        if self.regions.is_empty() {
            RegistryConfig::builtin()
        } else {
            Ok(RegistryConfig {
                regions: self.regions.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.filter.default_threshold, 4.0);
        assert_eq!(config.outlier.iqr_multiplier, 1.5);
        assert_eq!(config.outlier.min_intervals, 4);
        assert_eq!(config.analysis.shallow_depth_km, 70.0);
        assert_eq!(config.predictor.recent_weight, 0.4);
        assert_eq!(config.predictor.location, LocationStrategy::RecentEvents);
        assert_eq!(config.scoring.volume_saturation, 50);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = QuakeConfig::from_toml_str("").unwrap();
        assert_eq!(config, QuakeConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = QuakeConfig::from_toml_str(
            r#"
            [engine.outlier]
            iqr_multiplier = 3.0

            [engine.predictor]
            location = "region_centroid"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.outlier.iqr_multiplier, 3.0);
        assert_eq!(config.engine.outlier.min_intervals, 4);
        assert_eq!(config.engine.predictor.location, LocationStrategy::RegionCentroid);
        assert_eq!(config.engine.predictor.recent_weight, 0.4);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = QuakeConfig::from_toml_str("[engine\n").unwrap_err();
        assert!(matches!(err, QuakeError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = QuakeConfig::load("/nonexistent/quakecast.toml").unwrap_err();
        assert!(err.to_string().contains("quakecast.toml"));
    }

    #[test]
    fn test_registry_falls_back_to_builtin() {
        let config = QuakeConfig::default();
        assert_eq!(config.registry_config().unwrap().regions.len(), 16);
    }
}
