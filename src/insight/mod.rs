//! Insight Engine
//!
//! Derives six bounded scores from the chain contents, plus an aggregate
//! score, threshold-driven insights and recommendations, trend hints and
//! projected impact figures. Everything is recomputed from the full chain on
//! each call.

pub mod advice;
pub mod engine;
pub mod impact;
pub mod metrics;
pub mod report;
pub mod strategy;
pub mod trends;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use advice::{Insight, Priority, Recommendation, Severity};
pub use engine::{AggregateWeights, BoundsConfig, InsightConfig, InsightEngine};
pub use impact::{ImpactCalculator, ImpactOutcomes};
pub use report::AnalysisReport;
pub use strategy::{round_half_up, MetricBounds, ScoringStrategy};
pub use trends::{MetricTrend, PerformanceTrends, TrendDirection};
pub use view::ChainView;

/// One of the six scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Economic,
    Trust,
    Sustainability,
    Competitiveness,
    FutureReadiness,
    Ecosystem,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Economic,
        Metric::Trust,
        Metric::Sustainability,
        Metric::Competitiveness,
        Metric::FutureReadiness,
        Metric::Ecosystem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Economic => "economic",
            Metric::Trust => "trust",
            Metric::Sustainability => "sustainability",
            Metric::Competitiveness => "competitiveness",
            Metric::FutureReadiness => "futureReadiness",
            Metric::Ecosystem => "ecosystem",
        }
    }

    /// Human readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Economic => "Economic impact",
            Metric::Trust => "Trust & credibility",
            Metric::Sustainability => "Sustainability",
            Metric::Competitiveness => "Market competitiveness",
            Metric::FutureReadiness => "Future readiness",
            Metric::Ecosystem => "Ecosystem strength",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six scores, each an integer in its metric's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub economic: u32,
    pub trust: u32,
    pub sustainability: u32,
    pub competitiveness: u32,
    pub future_readiness: u32,
    pub ecosystem: u32,
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Economic => self.economic,
            Metric::Trust => self.trust,
            Metric::Sustainability => self.sustainability,
            Metric::Competitiveness => self.competitiveness,
            Metric::FutureReadiness => self.future_readiness,
            Metric::Ecosystem => self.ecosystem,
        }
    }

    pub(crate) fn set(&mut self, metric: Metric, value: u32) {
        match metric {
            Metric::Economic => self.economic = value,
            Metric::Trust => self.trust = value,
            Metric::Sustainability => self.sustainability = value,
            Metric::Competitiveness => self.competitiveness = value,
            Metric::FutureReadiness => self.future_readiness = value,
            Metric::Ecosystem => self.ecosystem = value,
        }
    }

    /// Pairs in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, u32)> + '_ {
        Metric::ALL.iter().map(move |&m| (m, self.get(m)))
    }
}
