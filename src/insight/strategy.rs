//! Scoring strategy contract and score bounds.

use super::view::ChainView;
use super::Metric;
use serde::{Deserialize, Serialize};

/// Computes one metric's raw score from a chain view
///
/// `None` means the chain holds no data for this metric; the engine then
/// substitutes the configured default.
pub trait ScoringStrategy: Send + Sync {
    fn metric(&self) -> Metric;

    fn raw_score(&self, view: &ChainView<'_>) -> Option<f64>;
}

/// Highest score any metric may report.
pub const MAX_SCORE: f64 = 100.0;

/// Clamp range and no-data default of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub low: f64,
    pub high: f64,
    pub default: u32,
}

impl MetricBounds {
    pub const fn new(low: f64, high: f64, default: u32) -> Self {
        MetricBounds { low, high, default }
    }

    /// Final integer score for a raw value.
    pub fn apply(&self, raw: Option<f64>) -> u32 {
        match raw {
            Some(value) if value.is_finite() => round_half_up(value.clamp(self.low, self.high)),
            _ => self.default,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.low.is_finite()
            && self.high.is_finite()
            && self.low >= 0.0
            && self.low <= self.high
            && self.high <= MAX_SCORE
            && (self.low..=self.high).contains(&f64::from(self.default))
    }
}

/// Round to the nearest integer, halves upward. Negative input yields 0.
pub fn round_half_up(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(74.5), 75);
        assert_eq!(round_half_up(74.49), 74);
        assert_eq!(round_half_up(81.55), 82);
        assert_eq!(round_half_up(-3.0), 0);
    }

    #[test]
    fn test_bounds_clamp_then_round() {
        let bounds = MetricBounds::new(60.0, 95.0, 75);
        assert_eq!(bounds.apply(None), 75);
        assert_eq!(bounds.apply(Some(18.9)), 60);
        assert_eq!(bounds.apply(Some(74.2)), 74);
        assert_eq!(bounds.apply(Some(1200.0)), 95);
        assert_eq!(bounds.apply(Some(f64::NAN)), 75);
    }

    #[test]
    fn test_bounds_well_formed() {
        assert!(MetricBounds::new(60.0, 95.0, 75).is_well_formed());
        assert!(!MetricBounds::new(95.0, 60.0, 75).is_well_formed());
        assert!(!MetricBounds::new(60.0, 95.0, 99).is_well_formed());
        assert!(!MetricBounds::new(60.0, 250.0, 70).is_well_formed());
        assert!(MetricBounds::new(0.0, 100.0, 100).is_well_formed());
    }
}
