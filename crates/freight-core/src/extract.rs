//! Record extraction: one raw sheet to canonical shipment records.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use freight_ingest::{HeaderScanOptions, RawSheet, locate_header};
use freight_map::{PassthroughColumn, ResolvedSchema, VendorFieldMap, resolve_headers};
use freight_model::{CanonicalField, QualityFlag, RejectedRow, ShipmentRecord};
use freight_normalize::{
    Cleaned, clean_currency, clean_date, clean_decimal, clean_state, clean_text, clean_tracking,
    clean_zip, clean_zone,
};

use crate::error::ExtractError;

/// Options shared by every file in a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub header_scan: HeaderScanOptions,
}

/// Everything one sheet yielded.
#[derive(Debug)]
pub struct SheetExtraction {
    pub records: Vec<ShipmentRecord>,
    pub rejects: Vec<RejectedRow>,
    /// Unrecognized columns, kept for schema-drift auditing.
    pub passthrough: Vec<PassthroughColumn>,
    pub header_row: usize,
}

/// Extracts canonical records from one raw sheet.
///
/// Fails file-level when no header can be located or a vendor-required
/// column is absent; row problems go to the rejects collection instead.
pub fn extract_sheet(
    sheet: &RawSheet,
    map: &VendorFieldMap,
    alias_keys: &BTreeSet<String>,
    options: &ExtractOptions,
) -> Result<SheetExtraction, ExtractError> {
    let location =
        locate_header(&sheet.rows, alias_keys, &options.header_scan).ok_or_else(|| {
            ExtractError::HeaderNotFound {
                file: sheet.source_file.clone(),
            }
        })?;

    let headers = &sheet.rows[location.row_index];
    let schema = resolve_headers(headers, map);
    if !schema.is_complete() {
        return Err(ExtractError::MissingRequiredField {
            file: sheet.source_file.clone(),
            fields: schema.missing_required.clone(),
        });
    }
    if !schema.passthrough.is_empty() {
        debug!(
            file = %sheet.source_file,
            columns = schema.passthrough.len(),
            "unmapped columns kept as passthrough"
        );
    }

    let mut records = Vec::new();
    let mut rejects = Vec::new();
    for (row_index, row) in sheet.rows.iter().enumerate().skip(location.row_index + 1) {
        match extract_row(sheet, &schema, row, row_index) {
            Ok(record) => records.push(record),
            Err(reject) => rejects.push(reject),
        }
    }

    if !rejects.is_empty() {
        warn!(
            file = %sheet.source_file,
            kept = records.len(),
            rejected = rejects.len(),
            "rows rejected during extraction"
        );
    }

    Ok(SheetExtraction {
        records,
        rejects,
        passthrough: schema.passthrough.clone(),
        header_row: location.row_index,
    })
}

/// A required field's failure mode: which flag explains the reject.
type FieldFailure = (CanonicalField, QualityFlag, String);

fn cell<'a>(schema: &ResolvedSchema, row: &'a [String], field: CanonicalField) -> &'a str {
    schema
        .column(field)
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .unwrap_or("")
}

fn required<T>(
    cleaned: Cleaned<T>,
    field: CanonicalField,
    invalid_flag: QualityFlag,
    raw: &str,
) -> Result<T, FieldFailure> {
    match cleaned {
        Cleaned::Value(value) => Ok(value),
        Cleaned::Missing => Err((field, QualityFlag::MissingRequiredValue, raw.to_string())),
        Cleaned::Invalid => Err((field, invalid_flag, raw.to_string())),
    }
}

fn optional<T>(
    cleaned: Cleaned<T>,
    invalid_flag: QualityFlag,
    flags: &mut BTreeSet<QualityFlag>,
) -> Option<T> {
    match cleaned {
        Cleaned::Value(value) => Some(value),
        Cleaned::Missing => None,
        Cleaned::Invalid => {
            flags.insert(invalid_flag);
            None
        }
    }
}

fn extract_row(
    sheet: &RawSheet,
    schema: &ResolvedSchema,
    row: &[String],
    row_index: usize,
) -> Result<ShipmentRecord, RejectedRow> {
    let mut flags = BTreeSet::new();

    let result = (|| -> Result<ShipmentRecord, FieldFailure> {
        let raw = |field| cell(schema, row, field);

        let tracking_number = required(
            clean_tracking(raw(CanonicalField::TrackingNumber)),
            CanonicalField::TrackingNumber,
            QualityFlag::MissingRequiredValue,
            raw(CanonicalField::TrackingNumber),
        )?;
        let invoice_date = required(
            clean_date(raw(CanonicalField::InvoiceDate)),
            CanonicalField::InvoiceDate,
            QualityFlag::DateUnparsable,
            raw(CanonicalField::InvoiceDate),
        )?
        .date;
        let ship_date = required(
            clean_date(raw(CanonicalField::ShipDate)),
            CanonicalField::ShipDate,
            QualityFlag::DateUnparsable,
            raw(CanonicalField::ShipDate),
        )?
        .date;
        let service_type = required(
            clean_text(raw(CanonicalField::ServiceType)),
            CanonicalField::ServiceType,
            QualityFlag::MissingRequiredValue,
            raw(CanonicalField::ServiceType),
        )?;
        let shipping_cost = required(
            clean_currency(raw(CanonicalField::ShippingCost)),
            CanonicalField::ShippingCost,
            QualityFlag::CurrencyUnparsable,
            raw(CanonicalField::ShippingCost),
        )?;
        let billed_weight = required(
            clean_decimal(raw(CanonicalField::BilledWeight)),
            CanonicalField::BilledWeight,
            QualityFlag::WeightUnparsable,
            raw(CanonicalField::BilledWeight),
        )?;
        let recipient_name = required(
            clean_text(raw(CanonicalField::RecipientName)),
            CanonicalField::RecipientName,
            QualityFlag::MissingRequiredValue,
            raw(CanonicalField::RecipientName),
        )?;
        let recipient_state = required(
            clean_state(raw(CanonicalField::RecipientState)),
            CanonicalField::RecipientState,
            QualityFlag::StateUnrecognized,
            raw(CanonicalField::RecipientState),
        )?;
        let recipient_zip = required(
            clean_zip(raw(CanonicalField::RecipientZip)),
            CanonicalField::RecipientZip,
            QualityFlag::ZipUnparsable,
            raw(CanonicalField::RecipientZip),
        )?;
        let recipient_country = required(
            clean_text(raw(CanonicalField::RecipientCountry)),
            CanonicalField::RecipientCountry,
            QualityFlag::MissingRequiredValue,
            raw(CanonicalField::RecipientCountry),
        )?;

        let actual_weight = optional(
            clean_decimal(raw(CanonicalField::ActualWeight)),
            QualityFlag::WeightUnparsable,
            &mut flags,
        );
        let origin_state = optional(
            clean_state(raw(CanonicalField::OriginState)),
            QualityFlag::StateUnrecognized,
            &mut flags,
        );
        let reference_1 = clean_text(raw(CanonicalField::Reference1)).value();
        let reference_2 = clean_text(raw(CanonicalField::Reference2)).value();
        let reference_4 = clean_text(raw(CanonicalField::Reference4)).value();
        let zone = clean_zone(raw(CanonicalField::Zone)).value();
        let package_length = optional(
            clean_decimal(raw(CanonicalField::PackageLength)),
            QualityFlag::DimensionUnparsable,
            &mut flags,
        );
        let package_width = optional(
            clean_decimal(raw(CanonicalField::PackageWidth)),
            QualityFlag::DimensionUnparsable,
            &mut flags,
        );
        let package_height = optional(
            clean_decimal(raw(CanonicalField::PackageHeight)),
            QualityFlag::DimensionUnparsable,
            &mut flags,
        );

        Ok(ShipmentRecord {
            vendor: sheet.vendor,
            tracking_number,
            invoice_date,
            ship_date,
            service_type,
            shipping_cost,
            actual_weight,
            billed_weight,
            recipient_name,
            recipient_state,
            recipient_zip,
            recipient_country,
            origin_state,
            reference_1,
            reference_2,
            reference_4,
            zone,
            package_length,
            package_width,
            package_height,
            source_file: sheet.source_file.clone(),
            source_row: row_index,
            quality_flags: flags.clone(),
        })
    })();

    result.map_err(|(field, flag, raw_value)| RejectedRow {
        source_file: sheet.source_file.clone(),
        source_row: row_index,
        vendor: sheet.vendor,
        field,
        flag,
        raw_value,
    })
}
