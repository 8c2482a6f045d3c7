//! Header resolution against a vendor's alias table.

use std::collections::BTreeMap;

use freight_model::CanonicalField;
use freight_normalize::normalize_key;

use crate::vendor_map::VendorFieldMap;

/// A raw header that matched no alias. Kept, not discarded: unknown columns
/// are the first sign of schema drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughColumn {
    pub header: String,
    pub column: usize,
}

/// Outcome of resolving one header row. Explicit values throughout;
/// "unresolved" is data, not an error.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    /// Canonical field → column index in the sheet.
    pub columns: BTreeMap<CanonicalField, usize>,
    /// Headers that matched no alias, or hit an already-bound field.
    pub passthrough: Vec<PassthroughColumn>,
    /// Vendor-required fields with no resolved source column.
    pub missing_required: Vec<CanonicalField>,
}

impl ResolvedSchema {
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Resolves raw headers to canonical fields by scanning the vendor's alias
/// lists in declaration order; the first canonical field whose alias list
/// contains the normalized header wins. A field binds to the lowest-index
/// matching column; later duplicates stay passthrough.
pub fn resolve_headers(headers: &[String], map: &VendorFieldMap) -> ResolvedSchema {
    let alias_table = map.normalized_aliases();
    let mut columns: BTreeMap<CanonicalField, usize> = BTreeMap::new();
    let mut passthrough = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        let key = normalize_key(header);
        if key.is_empty() {
            continue;
        }
        let resolved = alias_table
            .iter()
            .find(|(_, keys)| keys.iter().any(|alias| alias == &key))
            .map(|(field, _)| *field);
        match resolved {
            Some(field) if !columns.contains_key(&field) => {
                columns.insert(field, index);
            }
            // Unknown header, or a second column for an already-bound field.
            _ => passthrough.push(PassthroughColumn {
                header: header.clone(),
                column: index,
            }),
        }
    }

    let missing_required = map
        .required
        .iter()
        .filter(|field| !columns.contains_key(field))
        .copied()
        .collect();

    ResolvedSchema {
        columns,
        passthrough,
        missing_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor_map::{fedex_field_map, ups_field_map};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn resolves_vendor_headers_case_insensitively() {
        let map = ups_field_map();
        let schema = resolve_headers(
            &headers(&[
                "tracking number",
                "CARRIER INVOICE DATE",
                "Pickup Date",
                "Service",
                "Shipping Cost",
                "Billed Weight",
                "Recipient Name",
                "Recipient State",
                "Recipient Postal Code",
                "Recipient Country",
            ]),
            &map,
        );
        assert!(schema.is_complete());
        assert_eq!(schema.column(CanonicalField::TrackingNumber), Some(0));
        assert_eq!(schema.column(CanonicalField::InvoiceDate), Some(1));
        assert_eq!(schema.column(CanonicalField::ShipDate), Some(2));
        assert_eq!(schema.column(CanonicalField::RecipientZip), Some(8));
    }

    #[test]
    fn unknown_headers_stay_passthrough() {
        let map = fedex_field_map();
        let schema = resolve_headers(&headers(&["Tracking Number", "Fuel Surcharge"]), &map);
        assert_eq!(schema.column(CanonicalField::TrackingNumber), Some(0));
        assert_eq!(
            schema.passthrough,
            vec![PassthroughColumn {
                header: "Fuel Surcharge".to_string(),
                column: 1,
            }]
        );
    }

    #[test]
    fn duplicate_columns_keep_first_binding() {
        let map = fedex_field_map();
        let schema = resolve_headers(
            &headers(&["Tracking Number", "Tracking #", "Invoice Date"]),
            &map,
        );
        assert_eq!(schema.column(CanonicalField::TrackingNumber), Some(0));
        assert_eq!(schema.passthrough.len(), 1);
        assert_eq!(schema.passthrough[0].column, 1);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let map = fedex_field_map();
        let schema = resolve_headers(&headers(&["Tracking Number", "Zone"]), &map);
        assert!(!schema.is_complete());
        assert!(
            schema
                .missing_required
                .contains(&CanonicalField::ShippingCost)
        );
        // Optional fields never appear in the missing list.
        assert!(!schema.missing_required.contains(&CanonicalField::Zone));
    }
}
