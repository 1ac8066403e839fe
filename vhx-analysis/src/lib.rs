//! VHX analysis engine.
//!
//! Pure, stateless computations over a vehicle's inspection history and
//! registration attributes: odometer-tampering detection, condition
//! scoring, recurring-defect mining, derived stats, and emission-zone
//! compliance. Every analysis is a pure function of its inputs: no I/O,
//! no retained state, no wall-clock reads ("today" is an explicit
//! parameter where needed). Analyses for many vehicles can therefore run
//! in parallel without coordination.

pub mod condition;
pub mod engine;
pub mod mileage;
pub mod normalize;
pub mod patterns;
pub mod stats;
pub mod zones;

pub use condition::ConditionScorer;
pub use engine::{AnalysisEngine, AnalysisRequest, MotSummary, VehicleAnalysis};
pub use mileage::{detect_clocking, ClockingAnalysis, ClockingFlag, ClockingFlagKind, FlagSeverity, RiskLevel};
pub use normalize::NormalizedHistory;
pub use patterns::{ConcernLevel, DefectCategory, DefectPatternMiner, FailurePattern};
pub use stats::{calculate_stats, VehicleStats};
pub use zones::{ComplianceStatus, EmissionZoneComplianceEngine, EmissionsComplianceReport};
