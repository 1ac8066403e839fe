//! Value objects exchanged with the analysis engine.
//!
//! Raw types mirror the registry API payloads (camelCase, stringly typed);
//! normalized types are what the analyzers actually consume. All of them
//! are owned by the caller; the engine never retains references.

pub mod inspection;
pub mod mileage;
pub mod vehicle;

pub use inspection::{
    Defect, DefectSeverity, InspectionRecord, OdometerReading, OdometerUnit, RawDefect,
    RawInspectionRecord, TestResult,
};
pub use mileage::MileageReading;
pub use vehicle::{parse_registry_date, FuelCategory, VehicleAttributes};
