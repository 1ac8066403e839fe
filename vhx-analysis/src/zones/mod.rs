//! Multi-jurisdiction emission zone compliance.
//!
//! Depends only on registration attributes, never on inspection history.
//! Zero-emission fuels are exempt everywhere; fossil fuels resolve a
//! numeric Euro standard (from the label, or inferred from manufacture
//! year) and are checked zone by zone against the injected rule table.

use serde::{Deserialize, Serialize};

use vhx_core::config::{ChargeType, EuroInferenceTable, ZoneRule, ZoneRuleTable};
use vhx_core::types::{FuelCategory, VehicleAttributes};

/// Aggregate compliance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Zero-emission vehicle, exempt from every zone.
    Exempt,
    Compliant,
    NonCompliant,
    /// No usable Euro standard and no manufacture year.
    Unknown,
}

/// One zone's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCompliance {
    pub zone_id: String,
    pub name: String,
    pub region: String,
    pub compliant: bool,
    /// What driving in the zone costs this vehicle ("No charge",
    /// "Exempt", or the zone's charge text).
    pub charge: String,
    pub cars_affected: bool,
    pub charge_type: ChargeType,
}

/// The single worst daily charge among non-compliant zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeSummary {
    pub zone: String,
    pub charge: String,
    pub amount: f64,
}

/// Per-zone results plus the aggregate summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsComplianceReport {
    pub status: ComplianceStatus,
    /// `None` when status is Unknown.
    pub compliant: Option<bool>,
    pub reason: String,
    pub fuel_category: FuelCategory,
    pub euro_standard: Option<u8>,
    /// True when the standard was estimated from manufacture year
    /// rather than read from the emissions label.
    pub euro_inferred: bool,
    pub zones: Vec<ZoneCompliance>,
    pub total_zones: usize,
    pub compliant_zones: usize,
    /// Counted over zones that affect private cars.
    pub non_compliant_zones: usize,
    pub highest_daily_charge: Option<ChargeSummary>,
    /// Penalty-style zones (Scottish LEZs) apply; these carry different
    /// remediation semantics than a daily charge.
    pub penalty_zones_apply: bool,
}

/// Zone compliance engine over an injected rule table.
#[derive(Debug, Clone, Default)]
pub struct EmissionZoneComplianceEngine {
    rules: ZoneRuleTable,
    inference: EuroInferenceTable,
}

impl EmissionZoneComplianceEngine {
    pub fn new(rules: ZoneRuleTable, inference: EuroInferenceTable) -> Self {
        Self { rules, inference }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Classify a vehicle against every configured zone.
    pub fn assess(&self, attributes: &VehicleAttributes) -> EmissionsComplianceReport {
        let fuel = attributes.fuel_category();

        if fuel == FuelCategory::ZeroEmission {
            return self.exempt_report(attributes, fuel);
        }

        let label_euro = attributes
            .euro_standard_label
            .as_deref()
            .and_then(parse_euro_number);
        let (euro, inferred) = match label_euro {
            Some(euro) => (Some(euro), false),
            None => match attributes.manufacture_year {
                Some(year) => (Some(self.inference.infer(year, fuel)), true),
                None => (None, false),
            },
        };
        let Some(euro) = euro else {
            return EmissionsComplianceReport {
                status: ComplianceStatus::Unknown,
                compliant: None,
                reason: "Euro standard not available - check with manufacturer".to_string(),
                fuel_category: fuel,
                euro_standard: None,
                euro_inferred: false,
                zones: Vec::new(),
                total_zones: self.rules.len(),
                compliant_zones: 0,
                non_compliant_zones: 0,
                highest_daily_charge: None,
                penalty_zones_apply: false,
            };
        };

        let mut zones = Vec::with_capacity(self.rules.len());
        let mut non_compliant: Vec<&ZoneRule> = Vec::new();

        for rule in self.rules.iter() {
            let compliant = if rule.is_zero_emission_zone() {
                // Only zero-emission vehicles escape a ZEZ; they were
                // handled above, so any fossil-fuel car fails here.
                !rule.cars_affected
            } else if !rule.cars_affected {
                true
            } else {
                rule.min_euro_for(fuel).is_some_and(|min| euro >= min)
            };

            let charge = if compliant {
                "No charge".to_string()
            } else {
                rule.charge.clone()
            };
            if !compliant {
                non_compliant.push(rule);
            }

            zones.push(ZoneCompliance {
                zone_id: rule.id.clone(),
                name: rule.name.clone(),
                region: rule.region.clone(),
                compliant,
                charge,
                cars_affected: rule.cars_affected,
                charge_type: rule.charge_type,
            });
        }

        let car_zone_count = zones.iter().filter(|z| z.cars_affected).count();
        let non_compliant_zones = zones
            .iter()
            .filter(|z| z.cars_affected && !z.compliant)
            .count();
        let compliant_zones = zones.iter().filter(|z| z.compliant).count();
        let all_compliant = non_compliant_zones == 0;

        let highest_daily_charge = non_compliant
            .iter()
            .filter(|r| r.charge_type == ChargeType::DailyCharge)
            .max_by(|a, b| a.charge_amount.total_cmp(&b.charge_amount))
            .map(|r| ChargeSummary {
                zone: r.name.clone(),
                charge: r.charge.clone(),
                amount: r.charge_amount,
            });
        let penalty_zones_apply = non_compliant
            .iter()
            .any(|r| r.charge_type == ChargeType::Penalty);

        let mut reason = format!("{} vehicle with Euro {euro}", fuel_display(attributes, fuel));
        if inferred {
            reason.push_str(" (estimated from year)");
        }
        if all_compliant {
            reason.push_str(&format!(
                " - meets emission requirements for all {car_zone_count} zones affecting cars"
            ));
        } else {
            let plural = if non_compliant_zones != 1 { "s" } else { "" };
            reason.push_str(&format!(" - non-compliant in {non_compliant_zones} zone{plural}"));
        }

        EmissionsComplianceReport {
            status: if all_compliant {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::NonCompliant
            },
            compliant: Some(all_compliant),
            reason,
            fuel_category: fuel,
            euro_standard: Some(euro),
            euro_inferred: inferred,
            zones,
            total_zones: self.rules.len(),
            compliant_zones,
            non_compliant_zones,
            highest_daily_charge,
            penalty_zones_apply,
        }
    }

    fn exempt_report(
        &self,
        attributes: &VehicleAttributes,
        fuel: FuelCategory,
    ) -> EmissionsComplianceReport {
        let zones: Vec<ZoneCompliance> = self
            .rules
            .iter()
            .map(|rule| ZoneCompliance {
                zone_id: rule.id.clone(),
                name: rule.name.clone(),
                region: rule.region.clone(),
                compliant: true,
                charge: "Exempt".to_string(),
                cars_affected: rule.cars_affected,
                charge_type: rule.charge_type,
            })
            .collect();

        EmissionsComplianceReport {
            status: ComplianceStatus::Exempt,
            compliant: Some(true),
            reason: format!(
                "{} vehicles are exempt from all UK emission zones",
                fuel_display(attributes, fuel)
            ),
            fuel_category: fuel,
            euro_standard: None,
            euro_inferred: false,
            total_zones: zones.len(),
            compliant_zones: zones.len(),
            non_compliant_zones: 0,
            zones,
            highest_daily_charge: None,
            penalty_zones_apply: false,
        }
    }
}

/// Extract the numeric Euro standard from labels like "Euro 6" or
/// "EURO6D": the first ASCII digit wins.
pub fn parse_euro_number(label: &str) -> Option<u8> {
    label.chars().find_map(|c| c.to_digit(10)).map(|d| d as u8)
}

/// Title-cased raw fuel text for display, falling back to the category.
fn fuel_display(attributes: &VehicleAttributes, fuel: FuelCategory) -> String {
    if let Some(raw) = attributes.fuel_type.as_deref() {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let mut chars = trimmed.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
            return format!("{}{}", first, chars.as_str().to_ascii_lowercase());
        }
    }
    match fuel {
        FuelCategory::ZeroEmission => "Zero-emission".to_string(),
        FuelCategory::Petrol => "Petrol".to_string(),
        FuelCategory::Diesel => "Diesel".to_string(),
        FuelCategory::Other => "Unknown fuel".to_string(),
    }
}
