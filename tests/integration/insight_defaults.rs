use tracechain::chain::RecordChain;
use tracechain::insight::{InsightEngine, Metric, TrendDirection};
use tracechain::record::{Quality, Stage};

use super::payload;

#[test]
fn genesis_only_chain_scores_defaults() {
    let engine = InsightEngine::default();
    let chain = RecordChain::new(1);
    let metrics = engine.compute_metrics(&chain);

    let expected = [
        (Metric::Economic, 75),
        (Metric::Trust, 85),
        (Metric::Sustainability, 70),
        (Metric::Competitiveness, 88),
        (Metric::FutureReadiness, 92),
        (Metric::Ecosystem, 78),
    ];
    for (metric, value) in expected {
        assert_eq!(metrics.get(metric), value, "{}", metric);
    }
    assert_eq!(engine.aggregate_score(&metrics), 82);
}

#[test]
fn populated_chain_scores_within_bounds() {
    let engine = InsightEngine::default();
    let mut chain = RecordChain::new(0);
    for stage in Stage::PIPELINE {
        let mut p = payload("CR001", stage, Quality::Premium);
        p.temperature = Some("22°C".to_string());
        p.humidity = Some("60%".to_string());
        p.is_automated = stage == Stage::Processing;
        chain.append(p);
    }
    chain.append(payload("CR002", Stage::Farm, Quality::GradeB));

    let metrics = engine.compute_metrics(&chain);
    for (metric, value) in metrics.iter() {
        let bounds = engine.config().bounds.get(metric);
        assert!(
            (bounds.low..=bounds.high).contains(&f64::from(value)),
            "{} = {} outside [{}, {}]",
            metric,
            value,
            bounds.low,
            bounds.high
        );
    }

    let report = engine.export_report(&chain);
    assert_eq!(report.metrics, metrics);
    assert_eq!(report.chain_stats.total_subjects, 2);
    assert_eq!(report.trends.trust.trend, TrendDirection::Increasing);
}
