//! Shared numeric constants for the analysis engine.

/// Average annual mileage for a UK car, in miles.
pub const UK_AVG_ANNUAL_MILEAGE: f64 = 7_400.0;

/// Annualized mileage above which a reading gap is considered improbable.
pub const MAX_REASONABLE_ANNUAL_MILEAGE: f64 = 30_000.0;

/// Fraction of the UK average below which total usage looks suspicious.
pub const SUSPICIOUSLY_LOW_FRACTION: f64 = 0.3;

/// Minimum total mileage before the suspiciously-low check applies.
pub const SUSPICIOUSLY_LOW_FLOOR_MILES: u32 = 10_000;

/// Small odometer drops within this many miles of the previous reading
/// are tolerated when the retest window also applies.
pub const RETEST_DROP_TOLERANCE_MILES: u32 = 200;

/// Fail/retest pairs within this many days may legitimately re-read the
/// odometer slightly lower.
pub const RETEST_WINDOW_DAYS: i64 = 14;

/// A vehicle's first periodic inspection typically falls three years
/// after first registration.
pub const FIRST_TEST_AGE_OFFSET_YEARS: f64 = 3.0;

/// Mean calendar year length in days.
pub const DAYS_PER_YEAR: f64 = 365.25;
