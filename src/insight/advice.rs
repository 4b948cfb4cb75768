//! Threshold rules turning metric scores into insights and recommendations.

use super::{Metric, Metrics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub category: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub action: String,
    pub impact: String,
}

enum Threshold {
    Below(u32),
    Above(u32),
}

impl Threshold {
    fn fires(&self, score: u32) -> bool {
        match *self {
            Threshold::Below(limit) => score < limit,
            Threshold::Above(limit) => score > limit,
        }
    }
}

struct InsightRule {
    metric: Metric,
    threshold: Threshold,
    category: &'static str,
    severity: Severity,
    message: &'static str,
}

struct RecommendationRule {
    metric: Metric,
    below: u32,
    priority: Priority,
    category: &'static str,
    action: &'static str,
    impact: &'static str,
}

const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        metric: Metric::Economic,
        threshold: Threshold::Below(70),
        category: "Economic",
        severity: Severity::Warning,
        message: "Track prices at every stage and cut intermediary steps to improve economic efficiency",
    },
    InsightRule {
        metric: Metric::Trust,
        threshold: Threshold::Above(90),
        category: "Trust",
        severity: Severity::Success,
        message: "Traceability is highly credible; lead with it in marketing",
    },
    InsightRule {
        metric: Metric::Sustainability,
        threshold: Threshold::Below(75),
        category: "Sustainability",
        severity: Severity::Info,
        message: "Record more environmental readings and sustainable practices",
    },
    InsightRule {
        metric: Metric::FutureReadiness,
        threshold: Threshold::Above(85),
        category: "Innovation",
        severity: Severity::Success,
        message: "Ready for new technology; expand automated and sensor-driven capture",
    },
    InsightRule {
        metric: Metric::Ecosystem,
        threshold: Threshold::Below(80),
        category: "Network",
        severity: Severity::Info,
        message: "Bring in more partners and broaden the network",
    },
];

const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        metric: Metric::Economic,
        below: 80,
        priority: Priority::High,
        category: "Economic",
        action: "Track prices at every stage",
        impact: "Greater price transparency and lower costs",
    },
    RecommendationRule {
        metric: Metric::Trust,
        below: 85,
        priority: Priority::Medium,
        category: "Trust",
        action: "Add more verification steps",
        impact: "Higher consumer confidence",
    },
    RecommendationRule {
        metric: Metric::Sustainability,
        below: 80,
        priority: Priority::Medium,
        category: "Sustainability",
        action: "Record environmental data and sustainable practices",
        impact: "Stronger green credentials",
    },
    RecommendationRule {
        metric: Metric::FutureReadiness,
        below: 90,
        priority: Priority::Low,
        category: "Innovation",
        action: "Adopt more automated and sensor-based capture",
        impact: "Better prepared for future demands",
    },
];

/// Insights whose rule fires for `metrics`, in rule order.
pub fn insights_for(metrics: &Metrics) -> Vec<Insight> {
    INSIGHT_RULES
        .iter()
        .filter(|rule| rule.threshold.fires(metrics.get(rule.metric)))
        .map(|rule| Insight {
            category: rule.category.to_string(),
            severity: rule.severity,
            message: rule.message.to_string(),
        })
        .collect()
}

/// Recommendations whose rule fires for `metrics`, in rule order.
pub fn recommendations_for(metrics: &Metrics) -> Vec<Recommendation> {
    RECOMMENDATION_RULES
        .iter()
        .filter(|rule| metrics.get(rule.metric) < rule.below)
        .map(|rule| Recommendation {
            priority: rule.priority,
            category: rule.category.to_string(),
            action: rule.action.to_string(),
            impact: rule.impact.to_string(),
        })
        .collect()
}
