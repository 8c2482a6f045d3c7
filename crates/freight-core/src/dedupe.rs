//! Exact-duplicate collapsing across invoice files.
//!
//! Carriers re-list shipments when an invoice is amended and the same
//! export lands in a folder twice. The first record per
//! (vendor, tracking number, invoice date) wins; removals are counted per
//! vendor so the run report keeps an audit trail.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::info;

use freight_model::{ShipmentRecord, Vendor};

#[derive(Debug)]
pub struct DedupOutcome {
    pub kept: Vec<ShipmentRecord>,
    pub removed_by_vendor: BTreeMap<Vendor, usize>,
}

pub fn dedupe_shipments(records: Vec<ShipmentRecord>) -> DedupOutcome {
    let mut seen: BTreeSet<(Vendor, String, NaiveDate)> = BTreeSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut removed_by_vendor: BTreeMap<Vendor, usize> = BTreeMap::new();

    for record in records {
        let key = (
            record.vendor,
            record.tracking_number.clone(),
            record.invoice_date,
        );
        if seen.insert(key) {
            kept.push(record);
        } else {
            *removed_by_vendor.entry(record.vendor).or_insert(0) += 1;
        }
    }

    let removed: usize = removed_by_vendor.values().sum();
    if removed > 0 {
        info!(kept = kept.len(), removed, "collapsed duplicate shipments");
    }
    DedupOutcome {
        kept,
        removed_by_vendor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet as FlagSet;

    fn record(vendor: Vendor, tracking: &str, invoice_day: u32) -> ShipmentRecord {
        ShipmentRecord {
            vendor,
            tracking_number: tracking.to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 8, invoice_day).unwrap(),
            ship_date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            service_type: "Ground".to_string(),
            shipping_cost: 10.0,
            actual_weight: None,
            billed_weight: 1.0,
            recipient_name: "R".to_string(),
            recipient_state: "CA".to_string(),
            recipient_zip: "94107".to_string(),
            recipient_country: "US".to_string(),
            origin_state: None,
            reference_1: None,
            reference_2: None,
            reference_4: None,
            zone: None,
            package_length: None,
            package_width: None,
            package_height: None,
            source_file: "f.csv".to_string(),
            source_row: 0,
            quality_flags: FlagSet::new(),
        }
    }

    #[test]
    fn same_key_collapses_to_first() {
        let outcome = dedupe_shipments(vec![
            record(Vendor::Fedex, "794", 15),
            record(Vendor::Fedex, "794", 15),
        ]);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.removed_by_vendor[&Vendor::Fedex], 1);
    }

    #[test]
    fn differing_tracking_or_date_both_survive() {
        let outcome = dedupe_shipments(vec![
            record(Vendor::Fedex, "794", 15),
            record(Vendor::Fedex, "795", 15),
            record(Vendor::Fedex, "794", 16),
            record(Vendor::Ups, "794", 15),
        ]);
        assert_eq!(outcome.kept.len(), 4);
        assert!(outcome.removed_by_vendor.is_empty());
    }
}
