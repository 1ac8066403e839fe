//! UK emission zone rule table.
//!
//! Covers all active UK emission zones as of 2025/26: London ULEZ and
//! LEZ, the English Clean Air Zones, the four Scottish penalty-based
//! LEZs, and the Oxford Zero Emission Zone. Loaded once at process
//! start; the engine treats the table as read-only.

use serde::{Deserialize, Serialize};

use crate::errors::RuleTableError;
use crate::types::FuelCategory;

/// Vehicle classes a zone charges. A = buses/taxis, B adds HGVs, C adds
/// LGVs/vans, D adds private cars. LEZ and ZEZ follow their own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneClass {
    A,
    B,
    C,
    D,
    Lez,
    Zez,
}

/// How a non-compliant driver pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
    /// Flat fee per day of driving in the zone.
    DailyCharge,
    /// Escalating penalty per detected offence (Scottish LEZs).
    Penalty,
}

/// One emission zone's rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRule {
    pub id: String,
    pub name: String,
    pub region: String,
    pub class: ZoneClass,
    pub cars_affected: bool,
    /// Minimum Euro standard for petrol cars. `None` means no Euro
    /// exemption exists (zero-emission zones).
    pub petrol_min_euro: Option<u8>,
    /// Minimum Euro standard for diesel cars.
    pub diesel_min_euro: Option<u8>,
    pub charge: String,
    pub charge_amount: f64,
    pub charge_type: ChargeType,
}

impl ZoneRule {
    /// True for zones where only zero-emission vehicles are exempt.
    pub fn is_zero_emission_zone(&self) -> bool {
        self.class == ZoneClass::Zez
    }

    /// Minimum Euro standard for a resolved fuel category.
    pub fn min_euro_for(&self, fuel: FuelCategory) -> Option<u8> {
        if fuel.uses_diesel_threshold() {
            self.diesel_min_euro
        } else {
            self.petrol_min_euro
        }
    }
}

/// The full rule table. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRuleTable {
    pub zones: Vec<ZoneRule>,
}

impl Default for ZoneRuleTable {
    fn default() -> Self {
        Self::built_in()
    }
}

impl ZoneRuleTable {
    /// The 14 active UK zones.
    pub fn built_in() -> Self {
        let daily = |id: &str, name: &str, class: ZoneClass, cars: bool, charge: &str, amount: f64| ZoneRule {
            id: id.to_string(),
            name: name.to_string(),
            region: "England".to_string(),
            class,
            cars_affected: cars,
            petrol_min_euro: Some(4),
            diesel_min_euro: Some(6),
            charge: charge.to_string(),
            charge_amount: amount,
            charge_type: ChargeType::DailyCharge,
        };
        let scottish = |id: &str, name: &str| ZoneRule {
            id: id.to_string(),
            name: name.to_string(),
            region: "Scotland".to_string(),
            class: ZoneClass::Lez,
            cars_affected: true,
            petrol_min_euro: Some(4),
            diesel_min_euro: Some(6),
            charge: "£60 first offence (doubles, max £480)".to_string(),
            charge_amount: 60.0,
            charge_type: ChargeType::Penalty,
        };

        let zones = vec![
            daily("london_ulez", "London ULEZ", ZoneClass::D, true, "£12.50/day", 12.50),
            // London LEZ targets HGVs and buses; private cars are exempt.
            daily("london_lez", "London LEZ", ZoneClass::Lez, false, "N/A (cars exempt)", 0.0),
            daily("birmingham_caz", "Birmingham CAZ", ZoneClass::D, true, "£8/day", 8.0),
            daily("bristol_caz", "Bristol CAZ", ZoneClass::D, true, "£9/day", 9.0),
            daily("bath_caz", "Bath CAZ", ZoneClass::C, false, "N/A (cars exempt)", 0.0),
            daily("bradford_caz", "Bradford CAZ", ZoneClass::C, false, "N/A (cars exempt)", 0.0),
            daily("portsmouth_caz", "Portsmouth CAZ", ZoneClass::B, false, "N/A (cars exempt)", 0.0),
            daily("sheffield_caz", "Sheffield CAZ", ZoneClass::C, false, "N/A (cars exempt)", 0.0),
            daily(
                "tyneside_caz",
                "Tyneside CAZ (Newcastle/Gateshead)",
                ZoneClass::C,
                false,
                "N/A (cars exempt)",
                0.0,
            ),
            scottish("glasgow_lez", "Glasgow LEZ"),
            scottish("edinburgh_lez", "Edinburgh LEZ"),
            scottish("aberdeen_lez", "Aberdeen LEZ"),
            scottish("dundee_lez", "Dundee LEZ"),
            ZoneRule {
                id: "oxford_zez".to_string(),
                name: "Oxford ZEZ".to_string(),
                region: "England".to_string(),
                class: ZoneClass::Zez,
                cars_affected: true,
                // No Euro exemption: only zero-emission vehicles escape the charge.
                petrol_min_euro: None,
                diesel_min_euro: None,
                charge: "£4-£10/day (all non-EVs)".to_string(),
                charge_amount: 4.0,
                charge_type: ChargeType::DailyCharge,
            },
        ];

        Self { zones }
    }

    /// Load an alternate table from TOML (`[[zones]]` entries).
    pub fn from_toml_str(input: &str) -> Result<Self, RuleTableError> {
        let table: Self = toml::from_str(input)?;
        table.validate()?;
        tracing::debug!(zones = table.len(), "loaded zone rule table");
        Ok(table)
    }

    fn validate(&self) -> Result<(), RuleTableError> {
        if self.zones.is_empty() {
            return Err(RuleTableError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for zone in &self.zones {
            if !seen.insert(zone.id.as_str()) {
                return Err(RuleTableError::DuplicateZoneId(zone.id.clone()));
            }
            if zone.charge_amount < 0.0 || zone.charge_amount.is_nan() {
                return Err(RuleTableError::NegativeCharge {
                    zone_id: zone.id.clone(),
                    amount: zone.charge_amount,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneRule> {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_table_has_14_zones() {
        let table = ZoneRuleTable::built_in();
        assert_eq!(table.len(), 14);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_exactly_one_zero_emission_zone() {
        let table = ZoneRuleTable::built_in();
        let zez: Vec<_> = table.iter().filter(|z| z.is_zero_emission_zone()).collect();
        assert_eq!(zez.len(), 1);
        assert_eq!(zez[0].id, "oxford_zez");
        assert_eq!(zez[0].min_euro_for(FuelCategory::Petrol), None);
    }

    #[test]
    fn test_car_affecting_zones() {
        let table = ZoneRuleTable::built_in();
        let car_zones = table.iter().filter(|z| z.cars_affected).count();
        // ULEZ, Birmingham, Bristol, 4 Scottish LEZs, Oxford ZEZ.
        assert_eq!(car_zones, 8);
    }

    #[test]
    fn test_from_toml_round_trip() {
        let toml = r#"
            [[zones]]
            id = "test_zone"
            name = "Test Zone"
            region = "England"
            class = "D"
            cars_affected = true
            petrol_min_euro = 4
            diesel_min_euro = 6
            charge = "£5/day"
            charge_amount = 5.0
            charge_type = "daily_charge"
        "#;
        let table = ZoneRuleTable::from_toml_str(toml).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.zones[0].min_euro_for(FuelCategory::Diesel), Some(6));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
            [[zones]]
            id = "dup"
            name = "A"
            region = "England"
            class = "D"
            cars_affected = true
            charge = "£5/day"
            charge_amount = 5.0
            charge_type = "daily_charge"

            [[zones]]
            id = "dup"
            name = "B"
            region = "England"
            class = "D"
            cars_affected = true
            charge = "£5/day"
            charge_amount = 5.0
            charge_type = "daily_charge"
        "#;
        assert!(matches!(
            ZoneRuleTable::from_toml_str(toml),
            Err(RuleTableError::DuplicateZoneId(_))
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            ZoneRuleTable::from_toml_str("zones = []"),
            Err(RuleTableError::Empty)
        ));
    }
}
