//! Trend hints derived from the current scores and chain size.

use super::{Metric, Metrics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub current: u32,
    pub trend: TrendDirection,
    pub change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTrends {
    pub economic: MetricTrend,
    pub trust: MetricTrend,
    pub sustainability: MetricTrend,
    pub competitiveness: MetricTrend,
    pub future_readiness: MetricTrend,
    pub ecosystem: MetricTrend,
}

enum Rising {
    Always,
    Never,
    Above(usize),
}

/// Baseline, divisor and rising condition per metric.
fn trend_rule(metric: Metric) -> (f64, f64, Rising) {
    match metric {
        Metric::Economic => (70.0, 5.0, Rising::Above(10)),
        Metric::Trust => (80.0, 3.0, Rising::Always),
        Metric::Sustainability => (65.0, 4.0, Rising::Above(15)),
        Metric::Competitiveness => (85.0, 2.0, Rising::Always),
        Metric::FutureReadiness => (90.0, 1.0, Rising::Never),
        Metric::Ecosystem => (75.0, 3.0, Rising::Above(20)),
    }
}

fn round_change(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl MetricTrend {
    fn compute(metric: Metric, current: u32, record_count: usize) -> Self {
        let (baseline, divisor, rising) = trend_rule(metric);
        let trend = match rising {
            Rising::Always => TrendDirection::Increasing,
            Rising::Above(limit) if record_count > limit => TrendDirection::Increasing,
            _ => TrendDirection::Stable,
        };
        MetricTrend {
            current,
            trend,
            change: round_change((f64::from(current) - baseline) / divisor),
        }
    }
}

impl PerformanceTrends {
    /// `record_count` excludes genesis.
    pub fn from_metrics(metrics: &Metrics, record_count: usize) -> Self {
        let trend = |m: Metric| MetricTrend::compute(m, metrics.get(m), record_count);
        PerformanceTrends {
            economic: trend(Metric::Economic),
            trust: trend(Metric::Trust),
            sustainability: trend(Metric::Sustainability),
            competitiveness: trend(Metric::Competitiveness),
            future_readiness: trend(Metric::FutureReadiness),
            ecosystem: trend(Metric::Ecosystem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Metrics {
        Metrics {
            economic: 75,
            trust: 85,
            sustainability: 70,
            competitiveness: 88,
            future_readiness: 92,
            ecosystem: 78,
        }
    }

    #[test]
    fn test_small_chain_trends() {
        let trends = PerformanceTrends::from_metrics(&defaults(), 0);
        assert_eq!(trends.economic.trend, TrendDirection::Stable);
        assert_eq!(trends.economic.change, 1);
        assert_eq!(trends.trust.trend, TrendDirection::Increasing);
        assert_eq!(trends.trust.change, 2);
        assert_eq!(trends.sustainability.change, 1);
        assert_eq!(trends.competitiveness.change, 2);
        assert_eq!(trends.future_readiness.trend, TrendDirection::Stable);
        assert_eq!(trends.future_readiness.change, 2);
        assert_eq!(trends.ecosystem.change, 1);
    }

    #[test]
    fn test_large_chain_trends_up() {
        let trends = PerformanceTrends::from_metrics(&defaults(), 21);
        assert_eq!(trends.economic.trend, TrendDirection::Increasing);
        assert_eq!(trends.sustainability.trend, TrendDirection::Increasing);
        assert_eq!(trends.ecosystem.trend, TrendDirection::Increasing);
        assert_eq!(trends.future_readiness.trend, TrendDirection::Stable);
    }

    #[test]
    fn test_negative_change_rounds_half_up() {
        let mut metrics = defaults();
        metrics.economic = 60;
        metrics.sustainability = 63;
        let trends = PerformanceTrends::from_metrics(&metrics, 5);
        assert_eq!(trends.economic.change, -2);
        // -0.5 rounds toward +inf
        assert_eq!(trends.sustainability.change, 0);
    }
}
