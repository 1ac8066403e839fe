//! Registration attributes and fuel classification.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Registration attributes from the vehicle registry.
///
/// Every field is optional: analyses degrade to explicit unknown results
/// when inputs are missing, they never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleAttributes {
    #[serde(alias = "fuelType")]
    pub fuel_type: Option<String>,
    /// Free-text emissions label, e.g. "Euro 6" or "EURO6D".
    #[serde(alias = "euroStatus")]
    pub euro_standard_label: Option<String>,
    #[serde(alias = "yearOfManufacture")]
    pub manufacture_year: Option<i32>,
    #[serde(alias = "motExpiryDate", deserialize_with = "lenient_date")]
    pub mot_expiry_date: Option<NaiveDate>,
    #[serde(alias = "taxDueDate", deserialize_with = "lenient_date")]
    pub tax_due_date: Option<NaiveDate>,
    #[serde(alias = "dateOfLastV5CIssued", deserialize_with = "lenient_date")]
    pub v5c_issued_date: Option<NaiveDate>,
}

impl VehicleAttributes {
    pub fn fuel_category(&self) -> FuelCategory {
        FuelCategory::classify(self.fuel_type.as_deref())
    }
}

/// Registry dates are `YYYY-MM-DD` strings; anything unparsable becomes
/// `None` rather than a deserialization error.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_registry_date(&s)))
}

/// Parse the `YYYY-MM-DD` prefix of a registry date or timestamp string.
pub fn parse_registry_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Fuel category resolved from free-text fuel type.
///
/// Classification is case-insensitive and substring-tolerant: a
/// "DIESEL HYBRID" is diesel for compliance purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelCategory {
    /// Electric or hydrogen. Exempt from every emission zone.
    ZeroEmission,
    Petrol,
    Diesel,
    /// Hybrid, gas, or unrecognized. Treated as petrol for zone
    /// thresholds unless the text mentions diesel.
    Other,
}

impl FuelCategory {
    pub fn classify(fuel_type: Option<&str>) -> Self {
        let Some(raw) = fuel_type else {
            return Self::Other;
        };
        let upper = raw.trim().to_ascii_uppercase();
        match upper.as_str() {
            "ELECTRICITY" | "ELECTRIC" | "HYDROGEN" => return Self::ZeroEmission,
            "DIESEL" | "HEAVY OIL" => return Self::Diesel,
            "PETROL" => return Self::Petrol,
            _ => {}
        }
        if upper.contains("DIESEL") {
            Self::Diesel
        } else if upper.contains("PETROL") {
            Self::Petrol
        } else {
            Self::Other
        }
    }

    /// Whether diesel-strength zone thresholds apply.
    pub fn uses_diesel_threshold(self) -> bool {
        matches!(self, Self::Diesel)
    }
}
