//! Year-of-manufacture → Euro standard inference.
//!
//! Used when the registry carries no usable emissions label. Diesel
//! thresholds are stricter than petrol: Euro 6 diesels arrived around
//! 2015, Euro 6 petrols around 2011.

use serde::{Deserialize, Serialize};

use crate::types::FuelCategory;

/// Fuel-specific year thresholds, newest first. Each entry maps "made in
/// this year or later" to a Euro standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuroInferenceTable {
    pub diesel: Vec<(i32, u8)>,
    pub petrol: Vec<(i32, u8)>,
    /// Standard assumed for vehicles older than every threshold.
    pub floor: u8,
}

impl Default for EuroInferenceTable {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl EuroInferenceTable {
    pub fn static_defaults() -> Self {
        Self {
            diesel: vec![(2015, 6), (2009, 5), (2006, 4), (2001, 3)],
            petrol: vec![(2011, 6), (2006, 5), (2001, 4), (1997, 3)],
            floor: 2,
        }
    }

    /// Estimate the Euro standard for a manufacture year. Non-diesel
    /// categories (including hybrids and unknowns) use the petrol ladder.
    pub fn infer(&self, year: i32, fuel: FuelCategory) -> u8 {
        let ladder = if fuel.uses_diesel_threshold() {
            &self.diesel
        } else {
            &self.petrol
        };
        ladder
            .iter()
            .find(|(min_year, _)| year >= *min_year)
            .map(|(_, euro)| *euro)
            .unwrap_or(self.floor)
    }
}
