//! Forecast engine wiring the pipeline stages together

use crate::activity::{recent_activity, DEFAULT_ACTIVITY_WINDOW_DAYS};
use crate::analysis::SeismicPatternAnalyzer;
use crate::confidence::FiveFactorScorer;
use crate::filter::RegionEventFilter;
use crate::outlier::IqrOutlierRemover;
use crate::predictor::IntervalPredictor;
use crate::quality;
use crate::registry::RegionRegistry;
use chrono::{DateTime, Utc};
use quake_spi::{
    ConfidenceScorer, Event, EventFilter, ForecastReport, OutlierRemover, PatternAnalyzer,
    Prediction, Predictor, QuakeError, RegionAnalysis, RegionDefinition, Result,
    DEFAULT_SIGNIFICANCE_THRESHOLD,
};
use std::borrow::Cow;
use tracing::{debug, info};

/// Events a region needs before an interval can be measured
const MIN_EVENTS: usize = 2;

/// Runs filter, outlier removal, analysis, prediction and scoring for one
/// region per call.
///
/// Holds no mutable state; one engine can serve many threads.
pub struct ForecastEngine {
    registry: RegionRegistry,
    filter: Box<dyn EventFilter>,
    remover: Box<dyn OutlierRemover>,
    analyzer: Box<dyn PatternAnalyzer>,
    predictor: Box<dyn Predictor>,
    scorer: Box<dyn ConfidenceScorer>,
    default_threshold: f64,
    activity_window_days: i64,
}

impl std::fmt::Debug for ForecastEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastEngine")
            .field("registry", &self.registry)
            .field("default_threshold", &self.default_threshold)
            .field("activity_window_days", &self.activity_window_days)
            .finish_non_exhaustive()
    }
}

impl ForecastEngine {
    /// Engine with the default pipeline components
    pub fn new(registry: RegionRegistry) -> Self {
        Self {
            registry,
            filter: Box::new(RegionEventFilter::default()),
            remover: Box::new(IqrOutlierRemover::default()),
            analyzer: Box::new(SeismicPatternAnalyzer::default()),
            predictor: Box::new(IntervalPredictor::default()),
            scorer: Box::new(FiveFactorScorer::default()),
            default_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            activity_window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
        }
    }

    /// Replace the event filter; `default_threshold` must match the one the
    /// filter applies so diagnostics agree with it.
    pub fn with_filter(mut self, filter: impl EventFilter + 'static, default_threshold: f64) -> Self {
        self.filter = Box::new(filter);
        self.default_threshold = default_threshold;
        self
    }

    pub fn with_outlier_remover(mut self, remover: impl OutlierRemover + 'static) -> Self {
        self.remover = Box::new(remover);
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl PatternAnalyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    pub fn with_predictor(mut self, predictor: impl Predictor + 'static) -> Self {
        self.predictor = Box::new(predictor);
        self
    }

    pub fn with_scorer(mut self, scorer: impl ConfidenceScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn with_activity_window(mut self, days: i64) -> Self {
        self.activity_window_days = days;
        self
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Look up a region by name
    pub fn region(&self, name: &str) -> Result<&RegionDefinition> {
        self.registry.get(name)
    }

    /// Summary, confidence breakdown and diagnostics without a prediction.
    ///
    /// Works for any number of events; empty or single-event regions get
    /// the lowest confidence.
    pub fn analyze(
        &self,
        region: &str,
        historical: &[Event],
        live: &[Event],
        now: DateTime<Utc>,
    ) -> Result<RegionAnalysis> {
        let region = self.registry.get(region)?;
        let catalog = merge(historical, live);
        Ok(self.run_analysis(region, &catalog, now))
    }

    /// Full forecast for one region.
    ///
    /// Fails with `InvalidRegion` before touching the catalog when the name
    /// is unknown, and with `InsufficientData` when fewer than two events
    /// qualify.
    pub fn forecast(
        &self,
        region: &str,
        historical: &[Event],
        live: &[Event],
        now: DateTime<Utc>,
    ) -> Result<ForecastReport> {
        let region = self.registry.get(region)?;
        let catalog = merge(historical, live);
        let analysis = self.run_analysis(region, &catalog, now);

        if analysis.filter.qualifying < MIN_EVENTS {
            return Err(QuakeError::InsufficientData {
                region: region.name.clone(),
                required: MIN_EVENTS,
                actual: analysis.filter.qualifying,
            });
        }

        let projection = self.predictor.project(&analysis.summary, region, now)?;
        let prediction = Prediction::assemble(
            &region.name,
            &projection,
            &analysis.summary,
            analysis.breakdown.score(),
        );

        info!(
            region = %region.name,
            date = %prediction.predicted_date,
            magnitude = prediction.magnitude,
            confidence = prediction.confidence,
            "Forecast ready"
        );

        Ok(ForecastReport {
            prediction,
            analysis,
        })
    }

    fn run_analysis(
        &self,
        region: &RegionDefinition,
        catalog: &[Event],
        now: DateTime<Utc>,
    ) -> RegionAnalysis {
        let threshold = region.significance_threshold(self.default_threshold);
        let filtered = self.filter.filter(catalog, region);
        let cleaned = self.remover.clean(&filtered.series);
        debug!(
            region = %region.name,
            events = cleaned.events.len(),
            removed_intervals = cleaned.removed_intervals,
            "Cleaned series"
        );

        let summary = self.analyzer.analyze(&cleaned);
        let breakdown = self.scorer.score(&summary, now);

        RegionAnalysis {
            region: region.name.clone(),
            display_name: region.label().to_string(),
            threshold,
            quality: quality::assess(&summary, now),
            activity: recent_activity(catalog, region, threshold, now, self.activity_window_days),
            summary,
            breakdown,
            filter: filtered.stats,
        }
    }
}

/// Historical records first, so ties on timestamp keep history ahead of live
fn merge<'a>(historical: &'a [Event], live: &[Event]) -> Cow<'a, [Event]> {
    if live.is_empty() {
        Cow::Borrowed(historical)
    } else {
        Cow::Owned(historical.iter().chain(live).copied().collect())
    }
}
