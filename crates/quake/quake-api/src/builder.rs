//! Builder for a configured forecast engine

use crate::config::{EngineConfig, QuakeConfig};
use crate::registry_config::RegistryConfig;
use quake_core::{
    FiveFactorScorer, ForecastEngine, IntervalPredictor, IqrOutlierRemover, RegionEventFilter,
    RegionRegistry, Result, SeismicPatternAnalyzer,
};

/// Builder for [`ForecastEngine`]
///
/// Component parameters are validated in [`EngineBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    registry: Option<RegionRegistry>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder from a parsed configuration file
    pub fn from_config(config: &QuakeConfig) -> Result<Self> {
        let registry = config.registry_config()?.into_registry()?;
        Ok(Self {
            config: config.engine.clone(),
            registry: Some(registry),
        })
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: RegionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.config.outlier.iqr_multiplier = multiplier;
        self
    }

    pub fn default_threshold(mut self, threshold: f64) -> Self {
        self.config.filter.default_threshold = threshold;
        self
    }

    pub fn recent_weight(mut self, weight: f64) -> Self {
        self.config.predictor.recent_weight = weight;
        self
    }

    /// Build the engine; uses the built-in regions when none were given
    pub fn build(self) -> Result<ForecastEngine> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => RegistryConfig::builtin()?.into_registry()?,
        };
        let c = &self.config;

        let filter = RegionEventFilter::new(c.filter.default_threshold)?;
        let remover = IqrOutlierRemover::new(c.outlier.iqr_multiplier, c.outlier.min_intervals)?;
        let analyzer = SeismicPatternAnalyzer::new(
            c.analysis.shallow_depth_km,
            c.analysis.trend_dead_zone,
            c.analysis.recent_window,
            c.analysis.major_magnitude,
        )?;
        let predictor = IntervalPredictor::new(c.predictor.recent_weight, c.predictor.location)?;
        let scorer =
            FiveFactorScorer::new(c.scoring.volume_saturation, c.scoring.depth_spread_scale_km)?;

        Ok(ForecastEngine::new(registry)
            .with_filter(filter, c.filter.default_threshold)
            .with_outlier_remover(remover)
            .with_analyzer(analyzer)
            .with_predictor(predictor)
            .with_scorer(scorer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::QuakeError;

    #[test]
    fn test_default_build_uses_builtin_regions() {
        let engine = EngineBuilder::new().build().unwrap();
        assert_eq!(engine.registry().len(), 16);
        assert!(engine.region("Japan").is_ok());
    }

    #[test]
    fn test_invalid_parameter_surfaces() {
        let err = EngineBuilder::new().iqr_multiplier(-1.0).build().unwrap_err();
        assert!(matches!(err, QuakeError::InvalidParameter { .. }));

        let err = EngineBuilder::new().recent_weight(2.0).build().unwrap_err();
        assert!(err.to_string().contains("recent_weight"));
    }

    #[test]
    fn test_from_config_with_custom_regions() {
        let config = QuakeConfig::from_toml_str(
            r#"
            [engine.filter]
            default_threshold = 5.0

            [[regions]]
            name = "Iceland"
            lat_range = [63.0, 67.0]
            lon_range = [-25.0, -13.0]
            "#,
        )
        .unwrap();
        let engine = EngineBuilder::from_config(&config).unwrap().build().unwrap();
        assert_eq!(engine.registry().len(), 1);
        assert!(engine.region("Japan").is_err());
    }
}
