//! Raw registry payloads → chronological, typed inspection history.

use tracing::warn;
use vhx_core::types::{
    parse_registry_date, Defect, DefectSeverity, InspectionRecord, MileageReading, OdometerUnit,
    RawInspectionRecord, TestResult,
};

/// A cleaned, chronologically sorted inspection history.
///
/// Records with an unparsable test date are discarded (the rest of the
/// batch survives); records with an unparsable odometer are kept but
/// excluded from mileage-based analyses.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHistory {
    records: Vec<InspectionRecord>,
    discarded: usize,
}

impl NormalizedHistory {
    /// Sort and clean a batch of raw registry records.
    pub fn from_raw(raw: &[RawInspectionRecord]) -> Self {
        let mut discarded = 0usize;
        // Sort key is the full raw timestamp so that same-day fail/retest
        // pairs keep their intra-day order.
        let mut keyed: Vec<(String, InspectionRecord)> = Vec::with_capacity(raw.len());

        for entry in raw {
            let Some(raw_date) = entry.completed_date.as_deref() else {
                discarded += 1;
                continue;
            };
            let Some(test_date) = parse_registry_date(raw_date) else {
                discarded += 1;
                continue;
            };

            let record = InspectionRecord {
                test_date,
                odometer: entry.odometer_value.as_ref().and_then(|v| v.as_miles()),
                odometer_unit: entry
                    .odometer_unit
                    .as_deref()
                    .map(OdometerUnit::parse)
                    .unwrap_or_default(),
                result: entry
                    .test_result
                    .as_deref()
                    .map(TestResult::parse)
                    .unwrap_or(TestResult::Unknown),
                defects: entry
                    .defects
                    .iter()
                    .map(|d| Defect {
                        severity: d.severity.as_deref().and_then(DefectSeverity::parse_opt),
                        text: d.text.clone().unwrap_or_default(),
                    })
                    .collect(),
                expiry_date: entry.expiry_date.as_deref().and_then(parse_registry_date),
            };
            keyed.push((raw_date.to_string(), record));
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        if discarded > 0 {
            warn!(discarded, kept = keyed.len(), "dropped records with unparsable test dates");
        }

        Self {
            records: keyed.into_iter().map(|(_, r)| r).collect(),
            discarded,
        }
    }

    /// Chronological records, oldest first.
    pub fn records(&self) -> &[InspectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many raw records were dropped for unparsable dates.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Odometer readings in chronological order, one per record with a
    /// parseable odometer.
    pub fn mileage_readings(&self) -> Vec<MileageReading> {
        self.records
            .iter()
            .filter_map(|r| r.odometer.map(|miles| MileageReading::new(r.test_date, miles)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhx_core::types::OdometerReading;

    fn raw(date: &str, odometer: Option<&str>, result: &str) -> RawInspectionRecord {
        RawInspectionRecord {
            completed_date: Some(date.to_string()),
            odometer_value: odometer.map(|o| OdometerReading::Text(o.to_string())),
            test_result: Some(result.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sorts_chronologically() {
        let history = NormalizedHistory::from_raw(&[
            raw("2023-05-01T10:00:00Z", Some("30000"), "PASSED"),
            raw("2021-04-20T10:00:00Z", Some("10000"), "PASSED"),
            raw("2022-04-30T10:00:00Z", Some("20000"), "FAILED"),
        ]);
        let miles: Vec<u32> = history.mileage_readings().iter().map(|r| r.miles).collect();
        assert_eq!(miles, vec![10000, 20000, 30000]);
    }

    #[test]
    fn test_same_day_records_keep_timestamp_order() {
        let history = NormalizedHistory::from_raw(&[
            raw("2022-04-30T14:00:00Z", Some("20010"), "PASSED"),
            raw("2022-04-30T09:00:00Z", Some("20000"), "FAILED"),
        ]);
        assert_eq!(history.records()[0].result, TestResult::Failed);
        assert_eq!(history.records()[1].result, TestResult::Passed);
    }

    #[test]
    fn test_unparsable_date_drops_only_that_record() {
        let history = NormalizedHistory::from_raw(&[
            raw("not-a-date", Some("10000"), "PASSED"),
            raw("2022-04-30T10:00:00Z", Some("20000"), "PASSED"),
        ]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.discarded(), 1);
    }

    #[test]
    fn test_unparsable_odometer_keeps_record() {
        let history = NormalizedHistory::from_raw(&[
            raw("2022-04-30T10:00:00Z", Some("unreadable"), "PASSED"),
            raw("2023-05-01T10:00:00Z", Some("30000"), "PASSED"),
        ]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.mileage_readings().len(), 1);
    }

    #[test]
    fn test_missing_date_field_is_discarded() {
        let mut entry = raw("2022-04-30T10:00:00Z", None, "PASSED");
        entry.completed_date = None;
        let history = NormalizedHistory::from_raw(&[entry]);
        assert!(history.is_empty());
        assert_eq!(history.discarded(), 1);
    }
}
