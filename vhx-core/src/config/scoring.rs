//! Weight tables and thresholds for condition scoring.

use serde::{Deserialize, Serialize};

use crate::types::DefectSeverity;

/// Score deduction per defect, by severity. All values are negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub dangerous: f64,
    pub major: f64,
    pub minor: f64,
    pub advisory: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl SeverityWeights {
    pub fn static_defaults() -> Self {
        Self {
            dangerous: -25.0,
            major: -15.0,
            minor: -5.0,
            advisory: -3.0,
        }
    }

    /// Weight for a parsed severity. Unrecognized severities (`None`)
    /// contribute nothing.
    pub fn weight(&self, severity: Option<DefectSeverity>) -> f64 {
        let raw = match severity {
            Some(DefectSeverity::Dangerous) => self.dangerous,
            Some(DefectSeverity::Major) => self.major,
            Some(DefectSeverity::Minor) => self.minor,
            Some(DefectSeverity::Advisory) => self.advisory,
            None => 0.0,
        };
        if raw.is_nan() {
            0.0
        } else {
            raw
        }
    }
}

/// Recency multipliers for defect deductions, indexed from the most
/// recent test backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecencyWeights {
    pub latest: f64,
    pub previous: f64,
    pub third_latest: f64,
    pub older: f64,
}

impl Default for RecencyWeights {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl RecencyWeights {
    pub fn static_defaults() -> Self {
        Self {
            latest: 1.0,
            previous: 0.8,
            third_latest: 0.6,
            older: 0.3,
        }
    }

    /// Multiplier for a test `reverse_index` steps before the most
    /// recent one (0 = most recent).
    pub fn for_reverse_index(&self, reverse_index: usize) -> f64 {
        match reverse_index {
            0 => self.latest,
            1 => self.previous,
            2 => self.third_latest,
            _ => self.older,
        }
    }
}

/// Thresholds for the non-defect factors of the condition score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionScoringConfig {
    /// Points deducted per failed test.
    pub failure_deduction: f64,
    /// Actual/expected mileage ratio above which the heavier deduction applies.
    pub high_mileage_ratio: f64,
    pub high_mileage_deduction: f64,
    /// Ratio above which the lighter deduction applies.
    pub elevated_mileage_ratio: f64,
    pub elevated_mileage_deduction: f64,
    /// Deduction when advisories rise strictly across the last 3 tests.
    pub deteriorating_trend_deduction: f64,
    /// Bonus when advisories fall strictly across the last 3 tests.
    pub improving_trend_bonus: f64,
    /// Maximum score with exactly one test on record.
    pub single_test_cap: f64,
    /// Maximum score with exactly two tests on record.
    pub two_test_cap: f64,
    /// Score returned when there is no test history at all.
    pub neutral_score: u8,
}

impl Default for ConditionScoringConfig {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl ConditionScoringConfig {
    pub fn static_defaults() -> Self {
        Self {
            failure_deduction: 8.0,
            high_mileage_ratio: 2.0,
            high_mileage_deduction: 10.0,
            elevated_mileage_ratio: 1.5,
            elevated_mileage_deduction: 5.0,
            deteriorating_trend_deduction: 5.0,
            improving_trend_bonus: 3.0,
            single_test_cap: 85.0,
            two_test_cap: 92.0,
            neutral_score: 50,
        }
    }
}
