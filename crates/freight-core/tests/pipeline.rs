use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use freight_core::{PipelineConfig, run_pipeline};
use freight_ingest::discover_invoice_files;
use freight_map::VendorFieldMaps;
use freight_match::StaticOrderFeed;
use freight_model::{
    CanonicalField, FileStatus, MatchTier, OrderRecord, ProductCategory, QuantityVector, Vendor,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn order(id: &str, order_date: NaiveDate, name: &str, quantities: QuantityVector) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        order_date,
        customer_name: name.to_string(),
        quantities,
        total_line_value: 100.0,
    }
}

fn write_fixture_files(dir: &Path) {
    // FedEx export: banner rows above the header, a reject row with an
    // unparsable charge, a fuzzy-only row, an unmatchable row, and a
    // trailing totals row.
    fs::write(
        dir.join("FDX_20250815_LOL509.csv"),
        "\
FedEx Billing Export,,,,,,,,,,,,
Account,LOL509,,,,,,,,,,,
Tracking Number,Invoice Date,Ship Date,Service Type,Net Charge,Actual Weight,Billed Weight,Recipient Company,Recipient State,Recipient Zipcode,Recipient Country,Reference 2,Zone
794644790132,8/15/2025,8/2/2025,Ground,$22.00,3.1,4,Dana Whitfield,CA,94107,US,#355467,02
794644790133,8/15/2025,8/3/2025,Ground,$22.00,2.9,3,Priya Raman,NY,10001,US,#355468,05
794644790134,8/15/2025,8/3/2025,Ground,N/A,2.9,3,Broken Charge,NY,10001,US,#355470,05
794644790135,8/15/2025,8/4/2025,Ground,$14.00,1.5,2,Marcus Ellery LLC,WA,98101,US,,03
794644790136,8/15/2025,8/4/2025,Ground,$19.00,1.5,2,Zelda Qurrell,OR,97035,US,,06
Total,,,,,,,,,,,,
",
    )
    .unwrap();

    // UPS export: header on row 2, an exact duplicate shipment row.
    fs::write(
        dir.join("UPS_LOL509_08152025.csv"),
        "\
UPS Billing Summary,,,,,,,,,,
Tracking Number,Carrier Invoice Date,Pickup Date,Service,Shipping Cost,Billed Weight,Recipient Name,Recipient State,Recipient Postal Code,Recipient Country,Reference 1
1Z999AA10123456784,8/15/2025,8/2/2025,Ground,$30.00,5,Katherine Delgado,TX,73301,US,LOLA901222
1Z999AA10123456784,8/15/2025,8/2/2025,Ground,$30.00,5,Katherine Delgado,TX,73301,US,LOLA901222
",
    )
    .unwrap();

    // FedEx file without its charge column: fails per-file, run continues.
    fs::write(
        dir.join("FDX_malformed.csv"),
        "\
Tracking Number,Ship Date
794,8/2/2025
",
    )
    .unwrap();

    // No vendor keyword: skipped with a reason.
    fs::write(dir.join("generic_report.csv"), "a,b\n1,2\n").unwrap();
}

fn fixture_orders() -> Vec<OrderRecord> {
    let one_large = QuantityVector {
        large: 1,
        ..QuantityVector::default()
    };
    let two_large = QuantityVector {
        large: 2,
        ..QuantityVector::default()
    };
    let one_medium = QuantityVector {
        medium: 1,
        ..QuantityVector::default()
    };
    vec![
        order("355467", date(2025, 8, 1), "Dana Whitfield", one_large),
        order("355468", date(2025, 8, 1), "Priya Raman", one_large),
        order("901222", date(2025, 8, 1), "Katherine Delgado", two_large),
        order("700100", date(2025, 8, 3), "Marcus Ellery", one_medium),
    ]
}

#[test]
fn full_run_produces_aggregate_and_report() {
    let dir = TempDir::new().unwrap();
    write_fixture_files(dir.path());

    let files = discover_invoice_files(dir.path()).unwrap();
    let maps = VendorFieldMaps::builtin();
    let feed = StaticOrderFeed::new(fixture_orders());
    let config = PipelineConfig::default();

    let output = run_pipeline(&files, &maps, &feed, &config).unwrap();
    let report = &output.report;

    // Files: two read, one failed (missing charge column), one skipped.
    assert_eq!(report.files_read, 2);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.files_skipped, 1);
    let failed = report
        .files
        .iter()
        .find(|f| matches!(f.status, FileStatus::Failed { .. }))
        .unwrap();
    assert_eq!(failed.file, "FDX_malformed.csv");

    // Rows: the unparsable charge and the totals row are rejects.
    assert_eq!(report.rows_rejected, 2);
    assert_eq!(
        report.rejects_by_field.get(&CanonicalField::ShippingCost),
        Some(&1)
    );
    assert_eq!(
        report.rejects_by_field.get(&CanonicalField::InvoiceDate),
        Some(&1)
    );

    // The duplicate UPS shipment collapses, leaving five shipments.
    assert_eq!(report.duplicates_removed.get(&Vendor::Ups), Some(&1));
    assert_eq!(report.rows_extracted, 5);

    // Tiers: FedEx has two exact, one fuzzy-high, one unmatched; UPS one exact.
    let fedex = &report.match_tiers[&Vendor::Fedex];
    assert_eq!(fedex.get(&MatchTier::Exact), Some(&2));
    assert_eq!(fedex.get(&MatchTier::FuzzyHigh), Some(&1));
    assert_eq!(fedex.get(&MatchTier::Unmatched), Some(&1));
    let ups = &report.match_tiers[&Vendor::Ups];
    assert_eq!(ups.get(&MatchTier::Exact), Some(&1));
    assert_eq!(report.match_rate[&Vendor::Ups], 1.0);
    assert!(
        report
            .review_sample
            .iter()
            .any(|entry| entry.tracking_number == "794644790136")
    );

    // Aggregate: {large:1} x2 at $22, {large:2} x1 at $30, {medium:1} x1 at $14.
    assert_eq!(output.aggregate.len(), 3);
    let top = &output.aggregate[0];
    assert_eq!(top.count_of_orders, 2);
    assert_eq!(top.quantities.large, 1);
    assert!((top.avg_order_shipping_cost - 22.0).abs() < 1e-9);
    assert!((top.cost_per_product.unwrap() - 22.0).abs() < 1e-9);

    let averages = output.averages.as_ref().unwrap();
    let large = averages.per_category[&ProductCategory::Large];
    assert!((large - 18.5).abs() < 1e-9, "large average was {large}");
    let medium = averages.per_category[&ProductCategory::Medium];
    assert!((medium - 14.0).abs() < 1e-9);

    // Share sanity check holds for the completed run.
    assert!(report.share_check.as_ref().unwrap().ok);
    assert!(report.order_window.is_some());
}

#[test]
fn rerun_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write_fixture_files(dir.path());

    let files = discover_invoice_files(dir.path()).unwrap();
    let maps = VendorFieldMaps::builtin();
    let feed = StaticOrderFeed::new(fixture_orders());
    let config = PipelineConfig::default();

    let first = run_pipeline(&files, &maps, &feed, &config).unwrap();
    let second = run_pipeline(&files, &maps, &feed, &config).unwrap();
    assert_eq!(
        serde_json::to_string(&first.aggregate).unwrap(),
        serde_json::to_string(&second.aggregate).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.report).unwrap(),
        serde_json::to_string(&second.report).unwrap()
    );
}

#[test]
fn empty_order_feed_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    write_fixture_files(dir.path());

    let files = discover_invoice_files(dir.path()).unwrap();
    let maps = VendorFieldMaps::builtin();
    let feed = StaticOrderFeed::new(Vec::new());

    let result = run_pipeline(&files, &maps, &feed, &PipelineConfig::default());
    assert!(result.is_err(), "no aggregate may be produced without orders");
}
