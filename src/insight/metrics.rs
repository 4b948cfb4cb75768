//! The six scoring strategies.
//!
//! Each strategy reads a [`ChainView`] and produces a raw score from its own
//! weight table. Clamping and rounding happen in the engine.

use super::strategy::ScoringStrategy;
use super::view::ChainView;
use super::Metric;
use crate::record::{Quality, Record, Stage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn ratio(count: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count / total as f64
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

/// ASCII keywords match whole words (or a run of whole words); other
/// keywords match as substrings, since Thai is written without spaces.
fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    if !keyword.is_ascii() {
        return haystack.contains(keyword.as_str());
    }
    let wanted: Vec<&str> = tokens(&keyword).collect();
    if wanted.is_empty() {
        return false;
    }
    let found: Vec<&str> = tokens(haystack).collect();
    found
        .windows(wanted.len())
        .any(|window| window == wanted.as_slice())
}

/// `haystack` must already be lowercased.
fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| contains_keyword(haystack, keyword))
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Economic impact: journey depth, price transparency and market penetration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicWeights {
    pub full_journey_stages: f64,
    pub penetration_target: f64,
    pub fallback_direct_trade: f64,
    pub fallback_price_transparency: f64,
    pub direct_trade: f64,
    pub price_transparency: f64,
    pub penetration: f64,
}

impl Default for EconomicWeights {
    fn default() -> Self {
        Self {
            full_journey_stages: 7.0,
            penetration_target: 50.0,
            fallback_direct_trade: 70.0,
            fallback_price_transparency: 50.0,
            direct_trade: 0.4,
            price_transparency: 0.3,
            penetration: 0.3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EconomicStrategy {
    pub weights: EconomicWeights,
}

impl ScoringStrategy for EconomicStrategy {
    fn metric(&self) -> Metric {
        Metric::Economic
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        if view.record_count() == 0 {
            return None;
        }
        let w = &self.weights;

        let (direct_trade, price_transparency) = if view.histories.is_empty() {
            (w.fallback_direct_trade, w.fallback_price_transparency)
        } else {
            let mut direct = 0.0;
            let mut priced = 0.0;
            for history in &view.histories {
                direct += (history.len() as f64 / w.full_journey_stages).min(1.0) * 100.0;
                if history.records.iter().any(|r| r.payload.stage == Stage::Retail) {
                    priced += 100.0;
                }
            }
            let subjects = view.histories.len() as f64;
            (direct / subjects, priced / subjects)
        };

        let penetration = (view.record_count() as f64 / w.penetration_target).min(1.0) * 100.0;

        Some(
            direct_trade * w.direct_trade
                + price_transparency * w.price_transparency
                + penetration * w.penetration,
        )
    }
}

/// Trust: journey completeness, automated verification and chain integrity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustWeights {
    pub full_journey_stages: f64,
    pub complete_journey_min: usize,
    pub completeness: f64,
    pub complete_journeys: f64,
    pub automation: f64,
    pub integrity_bonus: f64,
    pub base: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            full_journey_stages: 7.0,
            complete_journey_min: 4,
            completeness: 40.0,
            complete_journeys: 30.0,
            automation: 15.0,
            integrity_bonus: 10.0,
            base: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrustStrategy {
    pub weights: TrustWeights,
}

impl ScoringStrategy for TrustStrategy {
    fn metric(&self) -> Metric {
        Metric::Trust
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        let subjects = view.subject_count();
        if subjects == 0 {
            return None;
        }
        let w = &self.weights;

        let mut completeness = 0.0;
        let mut complete_journeys = 0.0;
        let mut automated = 0.0;
        for history in &view.histories {
            completeness += (history.len() as f64 / w.full_journey_stages).min(1.0);
            if history.len() >= w.complete_journey_min {
                complete_journeys += 1.0;
            }
            if history.records.iter().any(|r| r.payload.is_automated) {
                automated += 1.0;
            }
        }

        let bonus = if view.is_valid { w.integrity_bonus } else { 0.0 };
        Some(
            ratio(completeness, subjects) * w.completeness
                + ratio(complete_journeys, subjects) * w.complete_journeys
                + ratio(automated, subjects) * w.automation
                + bonus
                + w.base,
        )
    }
}

/// Sustainability: eco keywords, climate readings and premium grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilityWeights {
    pub keywords: Vec<String>,
    pub keyword_points: f64,
    pub climate_points: f64,
    pub premium_points: f64,
    pub organic: f64,
    pub environmental: f64,
    pub average: f64,
    pub base: f64,
}

impl Default for SustainabilityWeights {
    fn default() -> Self {
        Self {
            keywords: owned(&[
                "organic",
                "sustainable",
                "eco",
                "green",
                "อินทรีย์",
                "ไม่ใช้สารเคมี",
                "ธรรมชาติ",
                "สิ่งแวดล้อม",
            ]),
            keyword_points: 2.0,
            climate_points: 1.0,
            premium_points: 0.5,
            organic: 35.0,
            environmental: 25.0,
            average: 25.0,
            base: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SustainabilityStrategy {
    pub weights: SustainabilityWeights,
}

impl ScoringStrategy for SustainabilityStrategy {
    fn metric(&self) -> Metric {
        Metric::Sustainability
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        let n = view.record_count();
        if n == 0 {
            return None;
        }
        let w = &self.weights;

        let mut points = 0.0;
        let mut organic = 0.0;
        let mut environmental = 0.0;
        for record in &view.records {
            let payload = &record.payload;
            if contains_any(&payload.details.to_lowercase(), &w.keywords) {
                points += w.keyword_points;
                organic += 1.0;
            }
            if payload.has_climate_readings() {
                points += w.climate_points;
                environmental += 1.0;
            }
            if payload.quality == Quality::Premium {
                points += w.premium_points;
            }
        }

        Some(
            (ratio(organic, n) * w.organic
                + ratio(environmental, n) * w.environmental
                + ratio(points, n) * w.average
                + w.base)
                * 100.0,
        )
    }
}

/// Market competitiveness: grade mix, origin claims and traceable lots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitivenessWeights {
    pub premium_points: f64,
    pub grade_a_points: f64,
    pub fallback_quality_ratio: f64,
    pub origin_keywords: Vec<String>,
    pub traceable_history_min: usize,
    pub traceable_points: f64,
    pub quality: f64,
    pub brand: f64,
    pub traceability: f64,
    pub base: f64,
}

impl Default for CompetitivenessWeights {
    fn default() -> Self {
        Self {
            premium_points: 2.0,
            grade_a_points: 1.0,
            fallback_quality_ratio: 0.6,
            origin_keywords: owned(&["altitude", "ระดับความสูง"]),
            traceable_history_min: 5,
            traceable_points: 0.5,
            quality: 40.0,
            brand: 30.0,
            traceability: 20.0,
            base: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompetitivenessStrategy {
    pub weights: CompetitivenessWeights,
}

impl ScoringStrategy for CompetitivenessStrategy {
    fn metric(&self) -> Metric {
        Metric::Competitiveness
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        let n = view.record_count();
        if n == 0 {
            return None;
        }
        let w = &self.weights;

        let mut graded = 0usize;
        let mut grade_points = 0.0;
        let mut brand = 0.0;
        let mut traceable = 0.0;
        for record in &view.records {
            let payload = &record.payload;
            if payload.quality != Quality::System {
                graded += 1;
                grade_points += match payload.quality {
                    Quality::Premium => w.premium_points,
                    Quality::GradeA => w.grade_a_points,
                    _ => 0.0,
                };
            }
            if contains_any(&payload.details.to_lowercase(), &w.origin_keywords) {
                brand += 1.0;
            }
            if view.history_len(payload.subject_id.as_str()) >= w.traceable_history_min {
                traceable += w.traceable_points;
            }
        }

        let quality = if graded > 0 {
            grade_points / graded as f64
        } else {
            w.fallback_quality_ratio
        };

        Some(
            (quality * w.quality + ratio(brand, n) * w.brand + ratio(traceable, n) * w.traceability
                + w.base)
                * 100.0,
        )
    }
}

/// Future readiness: automation, technology mentions and data richness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FutureReadinessWeights {
    pub tech_keywords: Vec<String>,
    pub modern_processes: Vec<String>,
    pub automated_innovation_points: f64,
    pub process_innovation_points: f64,
    pub automation: f64,
    pub technology: f64,
    pub digital: f64,
    pub innovation: f64,
    pub base: f64,
}

impl Default for FutureReadinessWeights {
    fn default() -> Self {
        Self {
            tech_keywords: owned(&[
                "ai",
                "iot",
                "sensor",
                "smart",
                "automated",
                "digital",
                "blockchain",
                "อัจฉริยะ",
                "เซ็นเซอร์",
                "อัตโนมัติ",
            ]),
            modern_processes: owned(&["washed process", "honey process"]),
            automated_innovation_points: 2.0,
            process_innovation_points: 0.5,
            automation: 30.0,
            technology: 25.0,
            digital: 25.0,
            innovation: 15.0,
            base: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FutureReadinessStrategy {
    pub weights: FutureReadinessWeights,
}

impl FutureReadinessStrategy {
    fn is_data_rich(record: &Record) -> bool {
        record.payload.has_climate_readings() && record.payload.batch_size.is_some()
    }
}

impl ScoringStrategy for FutureReadinessStrategy {
    fn metric(&self) -> Metric {
        Metric::FutureReadiness
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        let n = view.record_count();
        if n == 0 {
            return None;
        }
        let w = &self.weights;

        let mut automated = 0.0;
        let mut tech = 0.0;
        let mut digital = 0.0;
        let mut innovation = 0.0;
        for record in &view.records {
            let details = record.payload.details.to_lowercase();
            let operator = record.payload.operator.to_lowercase();

            if record.payload.is_automated {
                automated += 1.0;
                innovation += w.automated_innovation_points;
            }
            if contains_any(&details, &w.tech_keywords) || contains_any(&operator, &w.tech_keywords)
            {
                tech += 1.0;
            }
            if Self::is_data_rich(record) {
                digital += 1.0;
            }
            if contains_any(&details, &w.modern_processes) {
                innovation += w.process_innovation_points;
            }
        }

        Some(
            (ratio(automated, n) * w.automation
                + ratio(tech, n).min(1.0) * w.technology
                + ratio(digital, n) * w.digital
                + ratio(innovation, n).min(1.0) * w.innovation
                + w.base)
                * 100.0,
        )
    }
}

/// Ecosystem strength: participant diversity and cross-operator journeys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemWeights {
    pub operator_target: f64,
    pub location_target: f64,
    pub subject_target: f64,
    pub network_target: f64,
    pub collaboration_min_len: usize,
    pub engagement_min_operators: usize,
    pub operator_diversity: f64,
    pub location_diversity: f64,
    pub subject_variety: f64,
    pub collaboration: f64,
    pub engagement: f64,
    pub network: f64,
}

impl Default for EcosystemWeights {
    fn default() -> Self {
        Self {
            operator_target: 12.0,
            location_target: 10.0,
            subject_target: 8.0,
            network_target: 50.0,
            collaboration_min_len: 4,
            engagement_min_operators: 3,
            operator_diversity: 25.0,
            location_diversity: 20.0,
            subject_variety: 20.0,
            collaboration: 15.0,
            engagement: 10.0,
            network: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EcosystemStrategy {
    pub weights: EcosystemWeights,
}

impl ScoringStrategy for EcosystemStrategy {
    fn metric(&self) -> Metric {
        Metric::Ecosystem
    }

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64> {
        let operators = view.operator_count as f64;
        if view.operator_count == 0 {
            return None;
        }
        let locations = view.location_count as f64;
        let subjects = view.subject_count();
        let w = &self.weights;

        let mut collaborative = 0.0;
        let mut engaged = 0.0;
        for history in &view.histories {
            if history.len() >= w.collaboration_min_len {
                collaborative += 1.0;
            }
            let distinct: HashSet<&str> = history
                .records
                .iter()
                .map(|r| r.payload.operator.as_str())
                .collect();
            if distinct.len() >= w.engagement_min_operators {
                engaged += 1.0;
            }
        }

        Some(
            ((operators / w.operator_target).min(1.0) * w.operator_diversity
                + (locations / w.location_target).min(1.0) * w.location_diversity
                + (subjects as f64 / w.subject_target).min(1.0) * w.subject_variety
                + ratio(collaborative, subjects) * w.collaboration
                + ratio(engaged, subjects) * w.engagement
                + (operators * locations / w.network_target).min(1.0) * w.network)
                * 100.0,
        )
    }
}

/// Strategies with their default weight tables, in [`Metric::ALL`] order.
pub fn default_strategies() -> Vec<Box<dyn ScoringStrategy>> {
    vec![
        Box::new(EconomicStrategy::default()),
        Box::new(TrustStrategy::default()),
        Box::new(SustainabilityStrategy::default()),
        Box::new(CompetitivenessStrategy::default()),
        Box::new(FutureReadinessStrategy::default()),
        Box::new(EcosystemStrategy::default()),
    ]
}
