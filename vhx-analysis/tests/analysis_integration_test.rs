//! End-to-end scenarios over the full analysis pipeline.

use chrono::NaiveDate;
use proptest::prelude::*;

use vhx_analysis::engine::{AnalysisEngine, AnalysisRequest};
use vhx_analysis::mileage::{detect_clocking, ClockingFlagKind, RiskLevel};
use vhx_analysis::patterns::ConcernLevel;
use vhx_analysis::zones::ComplianceStatus;
use vhx_core::types::{
    MileageReading, OdometerReading, RawDefect, RawInspectionRecord, VehicleAttributes,
};

fn raw_test(date: &str, miles: i64, result: &str, defects: &[(&str, &str)]) -> RawInspectionRecord {
    RawInspectionRecord {
        completed_date: Some(format!("{date}T10:00:00Z")),
        odometer_value: Some(OdometerReading::Number(miles)),
        test_result: Some(result.to_string()),
        defects: defects
            .iter()
            .map(|(severity, text)| RawDefect {
                severity: Some(severity.to_string()),
                text: Some(text.to_string()),
            })
            .collect(),
        ..Default::default()
    }
}

fn today() -> NaiveDate {
    "2026-08-30".parse().unwrap()
}

#[test]
fn clocked_vehicle_end_to_end() {
    let engine = AnalysisEngine::with_defaults();
    let analysis = engine.analyze(
        &[
            raw_test("2020-05-01", 50000, "PASSED", &[]),
            raw_test("2021-05-03", 60000, "PASSED", &[]),
            raw_test("2022-05-02", 45000, "PASSED", &[]),
        ],
        &VehicleAttributes::default(),
        today(),
    );
    assert!(analysis.clocking.clocked);
    assert_eq!(analysis.clocking.risk_level, RiskLevel::High);
    let drop = analysis
        .clocking
        .flags
        .iter()
        .find(|f| f.kind == ClockingFlagKind::Drop)
        .expect("drop flag");
    assert_eq!(drop.drop_amount, Some(15000));
}

#[test]
fn recurring_brake_trouble_shows_up_as_a_pattern() {
    let engine = AnalysisEngine::with_defaults();
    let analysis = engine.analyze(
        &[
            raw_test("2019-05-01", 30000, "FAILED", &[("MAJOR", "Brake disc worn")]),
            raw_test("2020-05-01", 37000, "PASSED", &[("ADVISORY", "Brake pad wearing thin")]),
            raw_test("2021-05-01", 44000, "FAILED", &[("MAJOR", "Offside brake binding")]),
            raw_test("2022-05-01", 51000, "PASSED", &[("ADVISORY", "Brake hose chafed")]),
        ],
        &VehicleAttributes::default(),
        today(),
    );
    assert_eq!(analysis.failure_patterns.len(), 1);
    let pattern = &analysis.failure_patterns[0];
    assert_eq!(pattern.occurrences, 4);
    assert_eq!(pattern.concern_level, ConcernLevel::High);
}

#[test]
fn electric_vehicle_full_report() {
    let engine = AnalysisEngine::with_defaults();
    let attrs = VehicleAttributes {
        fuel_type: Some("ELECTRICITY".to_string()),
        ..Default::default()
    };
    let analysis = engine.analyze(&[], &attrs, today());
    assert_eq!(analysis.emissions.status, ComplianceStatus::Exempt);
    assert_eq!(analysis.emissions.zones.len(), 14);
    assert!(analysis.emissions.zones.iter().all(|z| z.compliant));
}

#[test]
fn petrol_euro_4_aggregate_fails_on_the_zez() {
    let engine = AnalysisEngine::with_defaults();
    let attrs = VehicleAttributes {
        fuel_type: Some("PETROL".to_string()),
        euro_standard_label: Some("Euro 4".to_string()),
        ..Default::default()
    };
    let analysis = engine.analyze(&[], &attrs, today());
    assert_eq!(analysis.emissions.compliant, Some(false));
    let failing: Vec<_> = analysis
        .emissions
        .zones
        .iter()
        .filter(|z| !z.compliant)
        .collect();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].zone_id, "oxford_zez");
}

#[test]
fn diesel_year_inference_splits_at_2015() {
    let engine = AnalysisEngine::with_defaults();
    let diesel = |year: i32| VehicleAttributes {
        fuel_type: Some("DIESEL".to_string()),
        manufacture_year: Some(year),
        ..Default::default()
    };

    let older = engine.analyze(&[], &diesel(2014), today()).emissions;
    assert_eq!(older.euro_standard, Some(5));
    assert!(older.euro_inferred);
    assert!(!older.zones.iter().find(|z| z.zone_id == "london_ulez").unwrap().compliant);

    let newer = engine.analyze(&[], &diesel(2016), today()).emissions;
    assert_eq!(newer.euro_standard, Some(6));
    assert!(newer.zones.iter().find(|z| z.zone_id == "london_ulez").unwrap().compliant);
}

#[test]
fn repeated_runs_serialize_byte_identically() {
    let engine = AnalysisEngine::with_defaults();
    let request = AnalysisRequest {
        records: vec![
            raw_test("2020-05-01", 21000, "PASSED", &[("ADVISORY", "Tyre worn")]),
            raw_test("2021-05-01", 28000, "FAILED", &[("MAJOR", "Brake disc worn")]),
            raw_test("2021-05-08", 28010, "PASSED", &[]),
        ],
        attributes: VehicleAttributes {
            fuel_type: Some("DIESEL".to_string()),
            manufacture_year: Some(2016),
            mot_expiry_date: Some("2026-05-08".parse().unwrap()),
            ..Default::default()
        },
    };
    let a = engine.analyze(&request.records, &request.attributes, today());
    let b = engine.analyze(&request.records, &request.attributes, today());
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn retest_after_failure_does_not_look_clocked() {
    let engine = AnalysisEngine::with_defaults();
    let analysis = engine.analyze(
        &[
            raw_test("2021-05-01", 40150, "FAILED", &[("MAJOR", "Headlamp aim incorrect")]),
            raw_test("2021-05-06", 40100, "PASSED", &[]),
            raw_test("2022-05-05", 47000, "PASSED", &[]),
        ],
        &VehicleAttributes::default(),
        today(),
    );
    assert!(!analysis.clocking.clocked);
    assert_eq!(analysis.clocking.risk_level, RiskLevel::None);
}

proptest! {
    /// Non-decreasing sequences under the 30k annualized ceiling never
    /// produce flags.
    #[test]
    fn clean_sequences_never_flag(
        start in 0u32..50_000,
        increments in prop::collection::vec(3_000u32..29_000, 1..12),
    ) {
        let base: NaiveDate = "2010-06-01".parse().unwrap();
        let mut readings = Vec::new();
        let mut miles = start;
        readings.push(MileageReading::new(base, miles));
        for (i, inc) in increments.iter().enumerate() {
            miles += inc;
            let date = base + chrono::Duration::days(365 * (i as i64 + 1));
            readings.push(MileageReading::new(date, miles));
        }

        let analysis = detect_clocking(&readings);
        prop_assert_eq!(analysis.risk_level, RiskLevel::None);
        prop_assert!(analysis.flags.is_empty());
        prop_assert!(!analysis.clocked);
    }

    /// The condition score stays within [0, 100] for arbitrary histories.
    #[test]
    fn condition_score_always_in_range(
        tests in prop::collection::vec(
            (0i64..250_000, 0usize..6, prop::bool::ANY),
            0..8,
        ),
    ) {
        let severities = ["DANGEROUS", "MAJOR", "MINOR", "ADVISORY"];
        let records: Vec<RawInspectionRecord> = tests
            .iter()
            .enumerate()
            .map(|(i, (miles, defect_count, failed))| {
                let defects: Vec<(&str, &str)> = (0..*defect_count)
                    .map(|d| (severities[d % severities.len()], "item"))
                    .collect();
                raw_test(
                    &format!("{}-06-01", 2010 + i),
                    *miles,
                    if *failed { "FAILED" } else { "PASSED" },
                    &defects,
                )
            })
            .collect();

        let engine = AnalysisEngine::with_defaults();
        let analysis = engine.analyze(&records, &VehicleAttributes::default(), today());
        prop_assert!(analysis.condition_score <= 100);
    }
}
