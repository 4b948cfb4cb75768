use super::{Insight, Metrics, PerformanceTrends, Recommendation};
use crate::chain::ChainStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete analysis bundle for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timestamp: DateTime<Utc>,
    pub chain_stats: ChainStats,
    pub metrics: Metrics,
    pub overall_score: u32,
    pub insights: Vec<Insight>,
    pub trends: PerformanceTrends,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
