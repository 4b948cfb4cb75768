//! Projected outcome figures that scale with chain activity.

use crate::chain::ChainStats;
use serde::{Deserialize, Serialize};

/// Projected outcomes. Percentages unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactOutcomes {
    pub avg_price_increase: f64,
    pub farmer_income_increase: f64,
    pub intermediary_reduction: f64,
    /// Head count.
    pub farmers_in_system: f64,
    /// Head count.
    pub households_benefited: f64,
    /// Out of 10.
    pub satisfaction_score: f64,
    /// Seconds to trace a lot.
    pub traceability_seconds: f64,
    pub counterfeit_reduction: f64,
    pub brand_premium: f64,
    pub carbon_reduction: f64,
    pub chemical_reduction: f64,
    pub organic_area_growth: f64,
}

pub struct ImpactCalculator;

impl ImpactCalculator {
    pub fn outcomes(stats: &ChainStats) -> ImpactOutcomes {
        let r = stats.total_records.saturating_sub(1) as f64;
        let o = stats.total_operators as f64;

        ImpactOutcomes {
            avg_price_increase: (r * 2.0 + 15.0).min(35.0),
            farmer_income_increase: (r * 2.5 + 20.0).min(45.0),
            intermediary_reduction: (r * 1.5 + 30.0).min(60.0),
            farmers_in_system: (o * 35.0 + 100.0).min(500.0),
            households_benefited: (o * 180.0 + 500.0).min(2000.0),
            satisfaction_score: (7.5 + r / 25.0).min(9.5),
            traceability_seconds: (10.0 - r / 8.0).max(2.0),
            counterfeit_reduction: (r * 3.0 + 60.0).min(90.0),
            brand_premium: (r * 2.0 + 20.0).min(50.0),
            carbon_reduction: (r * 1.2 + 15.0).min(35.0),
            chemical_reduction: (r * 2.0 + 25.0).min(50.0),
            organic_area_growth: (r * 4.0 + 80.0).min(150.0),
        }
    }

    /// Display rows as `(label, value)`.
    pub fn formatted(outcomes: &ImpactOutcomes) -> Vec<(&'static str, String)> {
        let pct = |v: f64| format!("{:.0}%", v);
        vec![
            ("Average price increase", pct(outcomes.avg_price_increase)),
            ("Farmer income increase", pct(outcomes.farmer_income_increase)),
            ("Intermediary reduction", pct(outcomes.intermediary_reduction)),
            ("Farmers in system", format!("{:.0}", outcomes.farmers_in_system)),
            ("Households benefited", format!("{:.0}", outcomes.households_benefited)),
            ("Satisfaction", format!("{:.1}/10", outcomes.satisfaction_score)),
            ("Traceability time", format!("{:.0} s", outcomes.traceability_seconds)),
            ("Counterfeit reduction", pct(outcomes.counterfeit_reduction)),
            ("Brand premium", pct(outcomes.brand_premium)),
            ("Carbon reduction", pct(outcomes.carbon_reduction)),
            ("Chemical reduction", pct(outcomes.chemical_reduction)),
            ("Organic area growth", pct(outcomes.organic_area_growth)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total_records: usize, total_operators: usize) -> ChainStats {
        ChainStats {
            total_records,
            total_subjects: 0,
            total_operators,
            total_locations: 0,
            is_valid: true,
        }
    }

    #[test]
    fn test_genesis_only_baseline() {
        let outcomes = ImpactCalculator::outcomes(&stats(1, 0));
        assert_eq!(outcomes.avg_price_increase, 15.0);
        assert_eq!(outcomes.farmers_in_system, 100.0);
        assert_eq!(outcomes.satisfaction_score, 7.5);
        assert_eq!(outcomes.traceability_seconds, 10.0);
        assert_eq!(outcomes.organic_area_growth, 80.0);
    }

    #[test]
    fn test_caps_apply_on_busy_chain() {
        let outcomes = ImpactCalculator::outcomes(&stats(201, 40));
        assert_eq!(outcomes.avg_price_increase, 35.0);
        assert_eq!(outcomes.farmer_income_increase, 45.0);
        assert_eq!(outcomes.households_benefited, 2000.0);
        assert_eq!(outcomes.satisfaction_score, 9.5);
        assert_eq!(outcomes.traceability_seconds, 2.0);
        assert_eq!(outcomes.counterfeit_reduction, 90.0);
    }

    #[test]
    fn test_formatted_rows() {
        let rows = ImpactCalculator::formatted(&ImpactCalculator::outcomes(&stats(5, 2)));
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], ("Average price increase", "23%".to_string()));
        assert_eq!(rows[5], ("Satisfaction", "7.7/10".to_string()));
    }
}
