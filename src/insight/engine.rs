//! Insight engine: runs the strategies and derives reports from the scores.

use super::advice;
use super::metrics::default_strategies;
use super::report::AnalysisReport;
use super::strategy::{round_half_up, MetricBounds, ScoringStrategy};
use super::trends::PerformanceTrends;
use super::view::ChainView;
use super::{Insight, Metric, Metrics, Recommendation};
use crate::chain::{RecordChain, SharedChain};
use crate::error::ApiError;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Clamp ranges and defaults for every metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub economic: MetricBounds,
    pub trust: MetricBounds,
    pub sustainability: MetricBounds,
    pub competitiveness: MetricBounds,
    pub future_readiness: MetricBounds,
    pub ecosystem: MetricBounds,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            economic: MetricBounds::new(60.0, 95.0, 75),
            trust: MetricBounds::new(70.0, 98.0, 85),
            sustainability: MetricBounds::new(60.0, 92.0, 70),
            competitiveness: MetricBounds::new(75.0, 98.0, 88),
            future_readiness: MetricBounds::new(80.0, 98.0, 92),
            ecosystem: MetricBounds::new(65.0, 95.0, 78),
        }
    }
}

impl BoundsConfig {
    pub fn get(&self, metric: Metric) -> &MetricBounds {
        match metric {
            Metric::Economic => &self.economic,
            Metric::Trust => &self.trust,
            Metric::Sustainability => &self.sustainability,
            Metric::Competitiveness => &self.competitiveness,
            Metric::FutureReadiness => &self.future_readiness,
            Metric::Ecosystem => &self.ecosystem,
        }
    }
}

/// Weights of the aggregate score; must sum to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateWeights {
    pub economic: f64,
    pub trust: f64,
    pub sustainability: f64,
    pub competitiveness: f64,
    pub future_readiness: f64,
    pub ecosystem: f64,
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            economic: 0.20,
            trust: 0.25,
            sustainability: 0.15,
            competitiveness: 0.15,
            future_readiness: 0.15,
            ecosystem: 0.10,
        }
    }
}

impl AggregateWeights {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Economic => self.economic,
            Metric::Trust => self.trust,
            Metric::Sustainability => self.sustainability,
            Metric::Competitiveness => self.competitiveness,
            Metric::FutureReadiness => self.future_readiness,
            Metric::Ecosystem => self.ecosystem,
        }
    }

    pub fn total(&self) -> f64 {
        Metric::ALL.iter().map(|&m| self.get(m)).sum()
    }
}

/// Insight engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub bounds: BoundsConfig,
    pub aggregate: AggregateWeights,
}

impl InsightConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        for metric in Metric::ALL {
            if !self.bounds.get(metric).is_well_formed() {
                return Err(ApiError::ConfigError(format!(
                    "bounds for {} must satisfy 0 <= low <= default <= high <= 100",
                    metric
                )));
            }
            if self.aggregate.get(metric) < 0.0 {
                return Err(ApiError::ConfigError(format!(
                    "aggregate weight for {} must not be negative",
                    metric
                )));
            }
        }
        let total = self.aggregate.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ApiError::ConfigError(format!(
                "aggregate weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// Scores a chain and remembers the most recent result
pub struct InsightEngine {
    config: InsightConfig,
    strategies: Vec<Box<dyn ScoringStrategy>>,
    last_metrics: Mutex<Option<Metrics>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self {
            config: InsightConfig::default(),
            strategies: default_strategies(),
            last_metrics: Mutex::new(None),
        }
    }
}

impl InsightEngine {
    /// Build an engine with the default strategies after validating `config`.
    pub fn new(config: InsightConfig) -> Result<Self, ApiError> {
        Self::with_strategies(config, default_strategies())
    }

    /// Build an engine with custom strategies. Metrics without a strategy
    /// always score their configured default.
    pub fn with_strategies(
        config: InsightConfig,
        strategies: Vec<Box<dyn ScoringStrategy>>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            config,
            strategies,
            last_metrics: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Score all six metrics and cache the result.
    pub fn compute_metrics(&self, chain: &RecordChain) -> Metrics {
        let view = ChainView::new(chain);
        let bounds = &self.config.bounds;
        let mut metrics = Metrics {
            economic: bounds.economic.default,
            trust: bounds.trust.default,
            sustainability: bounds.sustainability.default,
            competitiveness: bounds.competitiveness.default,
            future_readiness: bounds.future_readiness.default,
            ecosystem: bounds.ecosystem.default,
        };

        for strategy in &self.strategies {
            let metric = strategy.metric();
            let raw = strategy.raw_score(&view);
            let score = bounds.get(metric).apply(raw);
            debug!(metric = %metric, raw = ?raw, score, "Metric scored");
            metrics.set(metric, score);
        }

        *self.last_metrics.lock() = Some(metrics);
        metrics
    }

    /// Score a shared chain under its read lock.
    pub fn compute_shared(&self, chain: &SharedChain) -> Metrics {
        chain.read(|c| self.compute_metrics(c))
    }

    /// Metrics from the last computation, if any.
    pub fn last_metrics(&self) -> Option<Metrics> {
        *self.last_metrics.lock()
    }

    /// Weighted overall score of `metrics`.
    pub fn aggregate_score(&self, metrics: &Metrics) -> u32 {
        let weighted: f64 = metrics
            .iter()
            .map(|(metric, score)| f64::from(score) * self.config.aggregate.get(metric))
            .sum();
        round_half_up(weighted)
    }

    /// Recompute the metrics and return the overall score.
    pub fn overall_score(&self, chain: &RecordChain) -> u32 {
        let metrics = self.compute_metrics(chain);
        self.aggregate_score(&metrics)
    }

    pub fn generate_insights(&self, chain: &RecordChain) -> Vec<Insight> {
        advice::insights_for(&self.compute_metrics(chain))
    }

    pub fn generate_recommendations(&self, chain: &RecordChain) -> Vec<Recommendation> {
        advice::recommendations_for(&self.compute_metrics(chain))
    }

    pub fn performance_trends(&self, chain: &RecordChain) -> PerformanceTrends {
        let metrics = self.compute_metrics(chain);
        PerformanceTrends::from_metrics(&metrics, chain.len().saturating_sub(1))
    }

    /// Full analysis of `chain`, computed from one scoring pass.
    pub fn export_report(&self, chain: &RecordChain) -> AnalysisReport {
        let metrics = self.compute_metrics(chain);
        AnalysisReport {
            timestamp: Utc::now(),
            chain_stats: chain.stats(),
            metrics,
            overall_score: self.aggregate_score(&metrics),
            insights: advice::insights_for(&metrics),
            trends: PerformanceTrends::from_metrics(&metrics, chain.len().saturating_sub(1)),
            recommendations: advice::recommendations_for(&metrics),
        }
    }
}
