use freight_core::{ExtractError, ExtractOptions, extract_sheet};
use freight_ingest::RawSheet;
use freight_map::{VendorFieldMaps, fedex_field_map};
use freight_model::{CanonicalField, QualityFlag, Vendor};

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

fn fedex_sheet(rows: Vec<Vec<String>>) -> RawSheet {
    RawSheet::new("FDX_test.csv", Vendor::Fedex, rows)
}

#[test]
fn extracts_canonical_records_with_lineage() {
    let sheet = fedex_sheet(grid(&[
        &["FedEx Billing Export", ""],
        &[
            "Tracking Number", "Invoice Date", "Ship Date", "Service Type", "Net Charge",
            "Billed Weight", "Recipient Company", "Recipient State", "Recipient Zipcode",
            "Recipient Country", "Zone", "Fuel Surcharge",
        ],
        &[
            "794644790132", "8/15/2025", "8/2/2025", "Ground", "($5.25)", "4.0",
            "Dana Whitfield", "ca", "941071234", "US", "02", "1.10",
        ],
    ]));
    let maps = VendorFieldMaps::builtin();
    let extraction = extract_sheet(
        &sheet,
        &fedex_field_map(),
        &maps.all_alias_keys(),
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(extraction.header_row, 1);
    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.vendor, Vendor::Fedex);
    assert_eq!(record.tracking_number, "794644790132");
    // Credits come through negative, value-cleaned like any charge.
    assert!((record.shipping_cost + 5.25).abs() < 1e-9);
    assert_eq!(record.recipient_state, "CA");
    assert_eq!(record.recipient_zip, "94107-1234");
    assert_eq!(record.zone.as_deref(), Some("2"));
    assert_eq!(record.source_file, "FDX_test.csv");
    assert_eq!(record.source_row, 2);
    assert!(record.quality_flags.is_empty());

    // The unrecognized column survives as passthrough, not silently lost.
    assert_eq!(extraction.passthrough.len(), 1);
    assert_eq!(extraction.passthrough[0].header, "Fuel Surcharge");
}

#[test]
fn missing_required_value_rejects_only_that_row() {
    let sheet = fedex_sheet(grid(&[
        &[
            "Tracking Number", "Invoice Date", "Ship Date", "Service Type", "Net Charge",
            "Billed Weight", "Recipient Company", "Recipient State", "Recipient Zipcode",
            "Recipient Country",
        ],
        &[
            "794644790132", "8/15/2025", "8/2/2025", "Ground", "$18.40", "4.0",
            "Dana Whitfield", "CA", "94107", "US",
        ],
        &[
            "794644790133", "8/15/2025", "8/2/2025", "Ground", "not a number", "4.0",
            "Priya Raman", "NY", "10001", "US",
        ],
    ]));
    let maps = VendorFieldMaps::builtin();
    let extraction = extract_sheet(
        &sheet,
        &fedex_field_map(),
        &maps.all_alias_keys(),
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.rejects.len(), 1);
    let reject = &extraction.rejects[0];
    assert_eq!(reject.field, CanonicalField::ShippingCost);
    assert_eq!(reject.flag, QualityFlag::CurrencyUnparsable);
    assert_eq!(reject.raw_value, "not a number");
    assert_eq!(reject.source_row, 2);
}

#[test]
fn invalid_optional_value_keeps_the_row_with_a_flag() {
    let sheet = fedex_sheet(grid(&[
        &[
            "Tracking Number", "Invoice Date", "Ship Date", "Service Type", "Net Charge",
            "Actual Weight", "Billed Weight", "Recipient Company", "Recipient State",
            "Recipient Zipcode", "Recipient Country",
        ],
        &[
            "794644790132", "8/15/2025", "8/2/2025", "Ground", "$18.40", "??", "4.0",
            "Dana Whitfield", "CA", "94107", "US",
        ],
    ]));
    let maps = VendorFieldMaps::builtin();
    let extraction = extract_sheet(
        &sheet,
        &fedex_field_map(),
        &maps.all_alias_keys(),
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.actual_weight, None);
    assert!(record.quality_flags.contains(&QualityFlag::WeightUnparsable));
}

#[test]
fn headerless_sheet_fails_file_level() {
    let sheet = fedex_sheet(grid(&[&["1", "2"], &["3", "4"]]));
    let maps = VendorFieldMaps::builtin();
    let result = extract_sheet(
        &sheet,
        &fedex_field_map(),
        &maps.all_alias_keys(),
        &ExtractOptions::default(),
    );
    assert!(matches!(result, Err(ExtractError::HeaderNotFound { .. })));
}

#[test]
fn missing_required_column_names_the_fields() {
    let sheet = fedex_sheet(grid(&[
        &["Tracking Number", "Ship Date"],
        &["794644790132", "8/2/2025"],
    ]));
    let maps = VendorFieldMaps::builtin();
    let result = extract_sheet(
        &sheet,
        &fedex_field_map(),
        &maps.all_alias_keys(),
        &ExtractOptions::default(),
    );
    let Err(ExtractError::MissingRequiredField { fields, .. }) = result else {
        panic!("expected MissingRequiredField, got {result:?}");
    };
    assert!(fields.contains(&CanonicalField::InvoiceDate));
    assert!(fields.contains(&CanonicalField::ShippingCost));
    assert!(!fields.contains(&CanonicalField::TrackingNumber));
}
