//! Aggregate analysis entry point.
//!
//! Wires the five analyses together over one normalization pass. The
//! engine owns only immutable config tables, so a single instance can
//! serve many vehicles concurrently; `analyze_batch` fans out over a
//! rayon thread pool.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vhx_core::types::{MileageReading, RawInspectionRecord, TestResult, VehicleAttributes};

use crate::condition::ConditionScorer;
use crate::mileage::{detect_clocking, ClockingAnalysis};
use crate::normalize::NormalizedHistory;
use crate::patterns::{DefectPatternMiner, FailurePattern};
use crate::stats::{calculate_stats, VehicleStats};
use crate::zones::{EmissionZoneComplianceEngine, EmissionsComplianceReport};

/// The most recent test, for the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestTest {
    pub date: NaiveDate,
    pub result: TestResult,
    pub odometer: Option<u32>,
    pub expiry_date: Option<NaiveDate>,
}

/// Concise history summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotSummary {
    pub total_tests: usize,
    pub total_passes: usize,
    pub total_failures: usize,
    pub latest_test: Option<LatestTest>,
}

impl MotSummary {
    fn from_history(history: &NormalizedHistory) -> Self {
        let records = history.records();
        Self {
            total_tests: records.len(),
            total_passes: records.iter().filter(|r| r.result == TestResult::Passed).count(),
            total_failures: records.iter().filter(|r| r.result == TestResult::Failed).count(),
            latest_test: records.last().map(|r| LatestTest {
                date: r.test_date,
                result: r.result,
                odometer: r.odometer,
                expiry_date: r.expiry_date,
            }),
        }
    }
}

/// Everything the engine derives for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleAnalysis {
    pub clocking: ClockingAnalysis,
    pub condition_score: u8,
    pub failure_patterns: Vec<FailurePattern>,
    pub mileage_timeline: Vec<MileageReading>,
    pub stats: VehicleStats,
    pub emissions: EmissionsComplianceReport,
    pub summary: MotSummary,
}

/// One vehicle's inputs for batch analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub records: Vec<RawInspectionRecord>,
    pub attributes: VehicleAttributes,
}

/// The full analysis pipeline behind one façade.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    scorer: ConditionScorer,
    miner: DefectPatternMiner,
    zones: EmissionZoneComplianceEngine,
}

impl AnalysisEngine {
    pub fn new(
        scorer: ConditionScorer,
        miner: DefectPatternMiner,
        zones: EmissionZoneComplianceEngine,
    ) -> Self {
        Self { scorer, miner, zones }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Run every analysis for one vehicle. `today` anchors the stats
    /// countdowns; given a fixed value the result is fully
    /// deterministic.
    pub fn analyze(
        &self,
        records: &[RawInspectionRecord],
        attributes: &VehicleAttributes,
        today: NaiveDate,
    ) -> VehicleAnalysis {
        let history = NormalizedHistory::from_raw(records);
        let timeline = history.mileage_readings();

        let clocking = detect_clocking(&timeline);
        let condition_score = self.scorer.score(&history);
        let failure_patterns = self.miner.mine(&history);
        let stats = calculate_stats(&history, attributes, today);
        let emissions = self.zones.assess(attributes);
        let summary = MotSummary::from_history(&history);

        debug!(
            tests = history.len(),
            discarded = history.discarded(),
            condition_score,
            risk = ?clocking.risk_level,
            patterns = failure_patterns.len(),
            emissions = ?emissions.status,
            "vehicle analysis complete"
        );

        VehicleAnalysis {
            clocking,
            condition_score,
            failure_patterns,
            mileage_timeline: timeline,
            stats,
            emissions,
            summary,
        }
    }

    /// Analyze many vehicles in parallel. Order of results matches the
    /// order of requests.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest], today: NaiveDate) -> Vec<VehicleAnalysis> {
        requests
            .par_iter()
            .map(|req| self.analyze(&req.records, &req.attributes, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhx_core::types::OdometerReading;

    fn raw(date: &str, miles: i64, result: &str) -> RawInspectionRecord {
        RawInspectionRecord {
            completed_date: Some(format!("{date}T10:00:00Z")),
            odometer_value: Some(OdometerReading::Number(miles)),
            test_result: Some(result.to_string()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        "2026-08-30".parse().unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let engine = AnalysisEngine::with_defaults();
        let analysis = engine.analyze(
            &[
                raw("2021-06-01", 21000, "PASSED"),
                raw("2022-06-02", 28000, "FAILED"),
                raw("2022-06-09", 28010, "PASSED"),
            ],
            &VehicleAttributes::default(),
            today(),
        );
        assert_eq!(analysis.summary.total_tests, 3);
        assert_eq!(analysis.summary.total_passes, 2);
        assert_eq!(analysis.summary.total_failures, 1);
        let latest = analysis.summary.latest_test.unwrap();
        assert_eq!(latest.odometer, Some(28010));
        assert_eq!(latest.result, TestResult::Passed);
    }

    #[test]
    fn test_empty_input_degrades_everywhere() {
        let engine = AnalysisEngine::with_defaults();
        let analysis = engine.analyze(&[], &VehicleAttributes::default(), today());
        assert_eq!(analysis.condition_score, 50);
        assert_eq!(analysis.clocking.risk_level, crate::mileage::RiskLevel::Unknown);
        assert!(analysis.failure_patterns.is_empty());
        assert!(analysis.mileage_timeline.is_empty());
        assert_eq!(analysis.summary.total_tests, 0);
        assert_eq!(
            analysis.emissions.status,
            crate::zones::ComplianceStatus::Unknown
        );
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let engine = AnalysisEngine::with_defaults();
        let requests = vec![
            AnalysisRequest {
                records: vec![raw("2021-06-01", 21000, "PASSED"), raw("2022-06-02", 28000, "PASSED")],
                attributes: VehicleAttributes {
                    fuel_type: Some("PETROL".to_string()),
                    euro_standard_label: Some("Euro 6".to_string()),
                    ..Default::default()
                },
            },
            AnalysisRequest::default(),
        ];
        let batch = engine.analyze_batch(&requests, today());
        assert_eq!(batch.len(), 2);
        for (req, from_batch) in requests.iter().zip(&batch) {
            let individual = engine.analyze(&req.records, &req.attributes, today());
            assert_eq!(&individual, from_batch);
        }
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let engine = AnalysisEngine::with_defaults();
        let records = [
            raw("2020-06-01", 50000, "PASSED"),
            raw("2021-06-01", 60000, "PASSED"),
            raw("2022-06-01", 45000, "PASSED"),
        ];
        let attrs = VehicleAttributes {
            fuel_type: Some("DIESEL".to_string()),
            manufacture_year: Some(2014),
            ..Default::default()
        };
        let first = engine.analyze(&records, &attrs, today());
        let second = engine.analyze(&records, &attrs, today());
        assert_eq!(first, second);
    }
}
