//! Derived vehicle statistics.
//!
//! A flat bag of independently optional fields: age, expiry countdowns,
//! ownership-document recency, estimated annual mileage, and defect
//! totals. Absence of one input never blocks computation of the others.
//! "Today" is an explicit parameter so results are reproducible.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use vhx_core::constants::DAYS_PER_YEAR;
use vhx_core::types::{DefectSeverity, VehicleAttributes};

use crate::normalize::NormalizedHistory;

/// Status bucket for a dated obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    DueToday,
    /// Within 30 days.
    DueSoon,
    Valid,
}

/// Countdown to an expiry or due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryCountdown {
    pub date: NaiveDate,
    /// Negative when already past.
    pub days_remaining: i64,
    pub status: ExpiryStatus,
    pub detail: String,
}

impl ExpiryCountdown {
    /// `verb` reads naturally in "<verb> today" / "<verb> in N days":
    /// "Expires" for MOT certificates, "Due" for tax.
    fn build(date: NaiveDate, today: NaiveDate, verb: &str) -> Self {
        let days_remaining = (date - today).num_days();
        let (status, detail) = if days_remaining < 0 {
            (
                ExpiryStatus::Expired,
                format!("Expired {} days ago", -days_remaining),
            )
        } else if days_remaining == 0 {
            (ExpiryStatus::DueToday, format!("{verb} today"))
        } else if days_remaining <= 30 {
            (
                ExpiryStatus::DueSoon,
                format!("{verb} in {days_remaining} days"),
            )
        } else {
            (
                ExpiryStatus::Valid,
                format!("Valid for {days_remaining} days"),
            )
        };
        Self {
            date,
            days_remaining,
            status,
            detail,
        }
    }
}

/// How recently the ownership document (V5C) was reissued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipInsight {
    pub issued_date: NaiveDate,
    pub days_since: i64,
    /// Issued within the last 90 days.
    pub recent_change: bool,
    pub detail: String,
}

impl OwnershipInsight {
    fn build(issued_date: NaiveDate, today: NaiveDate) -> Self {
        let days_since = (today - issued_date).num_days();
        let (recent_change, detail) = if days_since <= 90 {
            (
                true,
                "V5C recently issued - may indicate recent ownership change".to_string(),
            )
        } else if days_since <= 365 {
            (false, format!("V5C issued {days_since} days ago"))
        } else {
            let years = days_since / 365;
            let plural = if years > 1 { "s" } else { "" };
            (false, format!("V5C issued ~{years} year{plural} ago"))
        };
        Self {
            issued_date,
            days_since,
            recent_change,
            detail,
        }
    }
}

/// Annual mileage relative to the 7,400-mile UK baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MileageAssessment {
    /// Under 5,000 miles/year.
    BelowAverage,
    /// 5,000-10,000 miles/year.
    Average,
    /// 10,000-15,000 miles/year.
    AboveAverage,
    /// Over 15,000 miles/year.
    High,
}

impl MileageAssessment {
    fn from_annual(annual: f64) -> Self {
        if annual < 5_000.0 {
            Self::BelowAverage
        } else if annual < 10_000.0 {
            Self::Average
        } else if annual < 15_000.0 {
            Self::AboveAverage
        } else {
            Self::High
        }
    }
}

/// Defect counts per severity across the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectTotals {
    pub dangerous: usize,
    pub major: usize,
    pub minor: usize,
    pub advisory: usize,
    /// Dangerous + major + minor.
    pub failure_items: usize,
}

/// Derived statistics. Every field independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleStats {
    pub vehicle_age_years: Option<i32>,
    pub manufacture_year: Option<i32>,
    pub mot_expiry: Option<ExpiryCountdown>,
    pub tax_due: Option<ExpiryCountdown>,
    pub ownership: Option<OwnershipInsight>,
    /// Rounded; negative for histories whose readings run backwards.
    pub estimated_annual_mileage: Option<i64>,
    pub total_recorded_mileage: Option<u32>,
    pub mileage_readings_count: usize,
    pub mileage_assessment: Option<MileageAssessment>,
    pub defect_totals: DefectTotals,
}

/// Compute derived stats from a normalized history and registration
/// attributes, relative to an explicit `today`.
pub fn calculate_stats(
    history: &NormalizedHistory,
    attributes: &VehicleAttributes,
    today: NaiveDate,
) -> VehicleStats {
    let mut stats = VehicleStats::default();

    if let Some(year) = attributes.manufacture_year {
        stats.manufacture_year = Some(year);
        stats.vehicle_age_years = Some(today.year() - year);
    }

    if let Some(expiry) = attributes.mot_expiry_date {
        stats.mot_expiry = Some(ExpiryCountdown::build(expiry, today, "Expires"));
    }
    if let Some(due) = attributes.tax_due_date {
        stats.tax_due = Some(ExpiryCountdown::build(due, today, "Due"));
    }
    if let Some(issued) = attributes.v5c_issued_date {
        stats.ownership = Some(OwnershipInsight::build(issued, today));
    }

    let readings = history.mileage_readings();
    stats.mileage_readings_count = readings.len();
    if readings.len() >= 2 {
        let first = readings[0];
        let last = readings[readings.len() - 1];
        let years = (last.date - first.date).num_days() as f64 / DAYS_PER_YEAR;
        if years > 0.0 {
            let annual = (last.miles as f64 - first.miles as f64) / years;
            stats.estimated_annual_mileage = Some(annual.round() as i64);
            stats.total_recorded_mileage = Some(last.miles);
            stats.mileage_assessment = Some(MileageAssessment::from_annual(annual));
        }
    }

    for record in history.records() {
        for defect in &record.defects {
            match defect.severity {
                Some(DefectSeverity::Dangerous) => {
                    stats.defect_totals.dangerous += 1;
                    stats.defect_totals.failure_items += 1;
                }
                Some(DefectSeverity::Major) => {
                    stats.defect_totals.major += 1;
                    stats.defect_totals.failure_items += 1;
                }
                Some(DefectSeverity::Minor) => {
                    stats.defect_totals.minor += 1;
                    stats.defect_totals.failure_items += 1;
                }
                Some(DefectSeverity::Advisory) => stats.defect_totals.advisory += 1,
                None => {}
            }
        }
    }

    stats
}
