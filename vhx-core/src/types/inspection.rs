//! Inspection test records, in raw registry form and normalized form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Defect severity, in decreasing order of safety concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DefectSeverity {
    Dangerous,
    Major,
    Minor,
    Advisory,
}

impl DefectSeverity {
    /// Parse a registry severity string, case-insensitively.
    ///
    /// Returns `None` for unrecognized strings; such defects still
    /// participate in text mining but carry no score weight.
    pub fn parse_opt(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DANGEROUS" => Some(Self::Dangerous),
            "MAJOR" => Some(Self::Major),
            "MINOR" => Some(Self::Minor),
            "ADVISORY" => Some(Self::Advisory),
            _ => None,
        }
    }
}

/// Overall result of one inspection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestResult {
    Passed,
    Failed,
    /// The registry sent something other than a pass or a fail.
    Unknown,
}

impl TestResult {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PASSED" => Self::Passed,
            "FAILED" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// Odometer unit as reported by the registry. Readings are treated as
/// miles throughout; the unit is carried for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OdometerUnit {
    #[default]
    Mi,
    Km,
}

impl OdometerUnit {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("km") {
            Self::Km
        } else {
            Self::Mi
        }
    }
}

/// A single defect noted during a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// `None` when the registry severity string was unrecognized.
    pub severity: Option<DefectSeverity>,
    pub text: String,
}

/// One normalized periodic inspection. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub test_date: NaiveDate,
    /// Absent when the registry odometer value was missing or unparsable.
    /// Such records are excluded from mileage-based analyses only.
    pub odometer: Option<u32>,
    pub odometer_unit: OdometerUnit,
    pub result: TestResult,
    pub defects: Vec<Defect>,
    pub expiry_date: Option<NaiveDate>,
}

impl InspectionRecord {
    /// Count defects of a given severity.
    pub fn defect_count(&self, severity: DefectSeverity) -> usize {
        self.defects
            .iter()
            .filter(|d| d.severity == Some(severity))
            .count()
    }
}

/// Registry odometer values arrive as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OdometerReading {
    Number(i64),
    Text(String),
}

impl OdometerReading {
    /// Parse to a non-negative mileage, or `None` if unparsable.
    pub fn as_miles(&self) -> Option<u32> {
        match self {
            Self::Number(n) => u32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }
}

/// A defect as it appears in the registry payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDefect {
    #[serde(rename = "type")]
    pub severity: Option<String>,
    #[serde(alias = "comment")]
    pub text: Option<String>,
}

/// An inspection test as it appears in the registry payload.
///
/// Older payloads use `rfrAndComments` instead of `defects`; both are
/// accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInspectionRecord {
    #[serde(rename = "completedDate")]
    pub completed_date: Option<String>,
    #[serde(rename = "odometerValue")]
    pub odometer_value: Option<OdometerReading>,
    #[serde(rename = "odometerUnit")]
    pub odometer_unit: Option<String>,
    #[serde(rename = "testResult")]
    pub test_result: Option<String>,
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,
    #[serde(alias = "rfrAndComments")]
    pub defects: Vec<RawDefect>,
}
