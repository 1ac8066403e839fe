//! Zone rule table loading errors.

/// Errors that can occur while loading or validating a zone rule table.
#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("Invalid zone rule TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Zone rule table is empty")]
    Empty,

    #[error("Duplicate zone id: {0}")]
    DuplicateZoneId(String),

    #[error("Zone {zone_id} has a negative charge amount: {amount}")]
    NegativeCharge { zone_id: String, amount: f64 },
}
