//! Error handling for VHX.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! The analysis path itself has no fatal errors: malformed domain data
//! degrades to explicit unknown/neutral results. Only configuration
//! loading can fail.

pub mod rule_table_error;

pub use rule_table_error::RuleTableError;
