//! Mileage integrity detection (odometer "clocking").
//!
//! Three checks over the chronological reading sequence: drops between
//! consecutive readings, improbable annualized jumps, and a whole-history
//! average far below UK norms. Small drops inside the fail/retest window
//! are tolerated; a failed test and its retest sometimes record
//! marginally different odometer values without genuine tampering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use vhx_core::constants::{
    DAYS_PER_YEAR, MAX_REASONABLE_ANNUAL_MILEAGE, RETEST_DROP_TOLERANCE_MILES, RETEST_WINDOW_DAYS,
    SUSPICIOUSLY_LOW_FLOOR_MILES, SUSPICIOUSLY_LOW_FRACTION, UK_AVG_ANNUAL_MILEAGE,
};
use vhx_core::types::MileageReading;

/// What a flag is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockingFlagKind {
    Drop,
    ImprobableJump,
    SuspiciouslyLow,
}

/// How strongly a flag suggests tampering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    High,
    Medium,
    Low,
}

/// Overall clocking risk for a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Fewer than two readings: insufficient evidence, not an error.
    Unknown,
    None,
    Low,
    Medium,
    High,
}

/// One piece of evidence. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockingFlag {
    pub kind: ClockingFlagKind,
    pub severity: FlagSeverity,
    pub detail: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub drop_amount: Option<u32>,
}

/// Verdict plus supporting flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockingAnalysis {
    pub clocked: bool,
    pub risk_level: RiskLevel,
    pub flags: SmallVec<[ClockingFlag; 4]>,
}

impl ClockingAnalysis {
    fn insufficient_evidence() -> Self {
        Self {
            clocked: false,
            risk_level: RiskLevel::Unknown,
            flags: SmallVec::new(),
        }
    }
}

/// Analyze a chronological mileage sequence for tampering evidence.
pub fn detect_clocking(readings: &[MileageReading]) -> ClockingAnalysis {
    if readings.len() < 2 {
        return ClockingAnalysis::insufficient_evidence();
    }

    let mut flags: SmallVec<[ClockingFlag; 4]> = SmallVec::new();
    detect_drops(readings, &mut flags);
    detect_improbable_jumps(readings, &mut flags);
    detect_suspiciously_low_average(readings, &mut flags);

    let (clocked, risk_level) = aggregate_risk(&flags);
    ClockingAnalysis {
        clocked,
        risk_level,
        flags,
    }
}

fn detect_drops(readings: &[MileageReading], flags: &mut SmallVec<[ClockingFlag; 4]>) {
    for pair in readings.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if next.miles >= current.miles {
            continue;
        }
        let drop = current.miles - next.miles;
        let days_apart = (next.date - current.date).num_days().abs();

        // Fail/retest tolerance: both conditions must hold to suppress.
        if drop < RETEST_DROP_TOLERANCE_MILES && days_apart <= RETEST_WINDOW_DAYS {
            continue;
        }

        flags.push(ClockingFlag {
            kind: ClockingFlagKind::Drop,
            severity: FlagSeverity::High,
            detail: format!(
                "Mileage dropped from {} to {} ({} mile drop)",
                current.miles, next.miles, drop
            ),
            from_date: Some(current.date),
            to_date: Some(next.date),
            drop_amount: Some(drop),
        });
    }
}

fn detect_improbable_jumps(readings: &[MileageReading], flags: &mut SmallVec<[ClockingFlag; 4]>) {
    for pair in readings.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let days = (next.date - current.date).num_days();
        if days <= 0 {
            continue;
        }

        let gained = next.miles as f64 - current.miles as f64;
        let annual_rate = gained / (days as f64 / DAYS_PER_YEAR);
        if annual_rate > MAX_REASONABLE_ANNUAL_MILEAGE {
            flags.push(ClockingFlag {
                kind: ClockingFlagKind::ImprobableJump,
                severity: FlagSeverity::Medium,
                detail: format!(
                    "Mileage increased by {} miles in {} days (~{:.0} miles/year annualised)",
                    gained as i64, days, annual_rate
                ),
                from_date: Some(current.date),
                to_date: Some(next.date),
                drop_amount: None,
            });
        }
    }
}

fn detect_suspiciously_low_average(
    readings: &[MileageReading],
    flags: &mut SmallVec<[ClockingFlag; 4]>,
) {
    let (first, last) = (readings[0], readings[readings.len() - 1]);
    let years = (last.date - first.date).num_days() as f64 / DAYS_PER_YEAR;
    if years <= 0.0 {
        return;
    }

    let avg_annual = (last.miles as f64 - first.miles as f64) / years;
    if avg_annual < UK_AVG_ANNUAL_MILEAGE * SUSPICIOUSLY_LOW_FRACTION
        && last.miles > SUSPICIOUSLY_LOW_FLOOR_MILES
    {
        flags.push(ClockingFlag {
            kind: ClockingFlagKind::SuspiciouslyLow,
            severity: FlagSeverity::Low,
            detail: format!(
                "Average {:.0} miles/year is well below the UK average of {:.0} miles/year",
                avg_annual, UK_AVG_ANNUAL_MILEAGE
            ),
            from_date: None,
            to_date: None,
            drop_amount: None,
        });
    }
}

fn aggregate_risk(flags: &[ClockingFlag]) -> (bool, RiskLevel) {
    let high = flags.iter().filter(|f| f.severity == FlagSeverity::High).count();
    let medium = flags.iter().filter(|f| f.severity == FlagSeverity::Medium).count();

    if high > 0 {
        (true, RiskLevel::High)
    } else if medium >= 2 {
        (false, RiskLevel::Medium)
    } else if !flags.is_empty() {
        (false, RiskLevel::Low)
    } else {
        (false, RiskLevel::None)
    }
}
