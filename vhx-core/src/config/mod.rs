//! Configuration tables for the analysis engine.
//! TOML-based where external data makes sense (zone rules); static
//! defaults everywhere. All tables are immutable once constructed and
//! injected into the analyzers, so tests can substitute alternates
//! without global patching.

pub mod euro_inference;
pub mod scoring;
pub mod zone_rules;

pub use euro_inference::EuroInferenceTable;
pub use scoring::{ConditionScoringConfig, RecencyWeights, SeverityWeights};
pub use zone_rules::{ChargeType, ZoneClass, ZoneRule, ZoneRuleTable};
