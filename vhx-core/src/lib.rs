//! Core types, errors, config tables, constants, and telemetry for VHX.
//!
//! Everything here is passive: value objects, immutable rule tables, and
//! error enums. The analysis logic lives in `vhx-analysis`; this crate
//! never computes a verdict.

pub mod config;
pub mod constants;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use config::{
    ConditionScoringConfig, EuroInferenceTable, RecencyWeights, SeverityWeights, ZoneRule,
    ZoneRuleTable,
};
pub use errors::RuleTableError;
pub use types::{
    Defect, DefectSeverity, FuelCategory, InspectionRecord, MileageReading, OdometerUnit,
    RawDefect, RawInspectionRecord, TestResult, VehicleAttributes,
};
