//! Condition scoring: a 0-100 verdict over the whole inspection history.
//!
//! Score bands:
//! - 90-100: excellent condition, clean history
//! - 75-89:  good condition, some wear
//! - 60-74:  fair, notable issues
//! - 40-59:  poor, significant concerns
//! - 0-39:   very poor, major red flags

use vhx_core::config::{ConditionScoringConfig, RecencyWeights, SeverityWeights};
use vhx_core::constants::{DAYS_PER_YEAR, FIRST_TEST_AGE_OFFSET_YEARS, UK_AVG_ANNUAL_MILEAGE};
use vhx_core::types::{DefectSeverity, InspectionRecord, TestResult};

use crate::normalize::NormalizedHistory;

/// Recency-weighted, trend-aware condition scorer.
///
/// All factors are additive; the result is recomputed from scratch on
/// every call.
#[derive(Debug, Clone, Default)]
pub struct ConditionScorer {
    severity: SeverityWeights,
    recency: RecencyWeights,
    config: ConditionScoringConfig,
}

impl ConditionScorer {
    pub fn new(
        severity: SeverityWeights,
        recency: RecencyWeights,
        config: ConditionScoringConfig,
    ) -> Self {
        Self {
            severity,
            recency,
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Score a history. No tests at all yields the neutral default,
    /// since there is no evidence either way.
    pub fn score(&self, history: &NormalizedHistory) -> u8 {
        let tests = history.records();
        if tests.is_empty() {
            return self.config.neutral_score;
        }

        let mut score = 100.0;
        score += self.defect_deductions(tests);
        score -= self.failure_deduction(tests);
        score -= self.mileage_deduction(tests);
        score += self.advisory_trend_adjustment(tests);
        score = self.apply_history_cap(score, tests.len());

        score.clamp(0.0, 100.0).round() as u8
    }

    /// Severity-weighted defect deductions, discounted by test recency.
    fn defect_deductions(&self, tests: &[InspectionRecord]) -> f64 {
        let n = tests.len();
        let mut total = 0.0;
        for (i, test) in tests.iter().enumerate() {
            let reverse_index = n - 1 - i;
            let recency = self.recency.for_reverse_index(reverse_index);
            for defect in &test.defects {
                total += self.severity.weight(defect.severity) * recency;
            }
        }
        total
    }

    fn failure_deduction(&self, tests: &[InspectionRecord]) -> f64 {
        let failures = tests.iter().filter(|t| t.result == TestResult::Failed).count();
        failures as f64 * self.config.failure_deduction
    }

    /// Deduct for mileage well above what the vehicle's age predicts.
    /// Low mileage is never penalized here (that is the integrity
    /// detector's concern).
    fn mileage_deduction(&self, tests: &[InspectionRecord]) -> f64 {
        let first = &tests[0];
        let latest = &tests[tests.len() - 1];
        let Some(latest_odometer) = latest.odometer.filter(|&m| m > 0) else {
            return 0.0;
        };

        // First periodic test typically lands at age three, so the span
        // between first and latest tests understates age by that much.
        let span_years = (latest.test_date - first.test_date).num_days() as f64 / DAYS_PER_YEAR;
        let estimated_age = span_years + FIRST_TEST_AGE_OFFSET_YEARS;
        if estimated_age <= 0.0 {
            return 0.0;
        }

        let expected = estimated_age * UK_AVG_ANNUAL_MILEAGE;
        let ratio = latest_odometer as f64 / expected;

        if ratio > self.config.high_mileage_ratio {
            self.config.high_mileage_deduction
        } else if ratio > self.config.elevated_mileage_ratio {
            self.config.elevated_mileage_deduction
        } else {
            0.0
        }
    }

    /// Strictly rising advisories over the last three tests deduct;
    /// strictly falling ones earn a small bonus.
    fn advisory_trend_adjustment(&self, tests: &[InspectionRecord]) -> f64 {
        if tests.len() < 3 {
            return 0.0;
        }
        let recent = &tests[tests.len() - 3..];
        let counts: Vec<usize> = recent
            .iter()
            .map(|t| t.defect_count(DefectSeverity::Advisory))
            .collect();

        if counts[0] < counts[1] && counts[1] < counts[2] {
            -self.config.deteriorating_trend_deduction
        } else if counts[0] > counts[1] && counts[1] > counts[2] {
            self.config.improving_trend_bonus
        } else {
            0.0
        }
    }

    /// Short histories cannot evidence sustained good condition, so they
    /// are capped. The cap only ever lowers a score.
    fn apply_history_cap(&self, score: f64, num_tests: usize) -> f64 {
        match num_tests {
            1 => score.min(self.config.single_test_cap),
            2 => score.min(self.config.two_test_cap),
            _ => score,
        }
    }
}
