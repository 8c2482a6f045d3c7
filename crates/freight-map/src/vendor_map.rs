//! Per-vendor field maps.
//!
//! A vendor contributes data, not behavior: its alias table, its required
//! fields, and the shapes its reference codes take. Maps are immutable after
//! load; extraction workers share them read-only.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use freight_model::{CanonicalField, Vendor};
use freight_normalize::normalize_key;

/// One canonical field with the raw headers known to mean it, in
/// precedence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAliases {
    pub field: CanonicalField,
    /// Accepted raw header spellings. Stored as written in the carrier
    /// exports; matching happens on normalized keys.
    pub aliases: Vec<String>,
}

/// A vendor's complete mapping data.
///
/// Entry order matters: when an alias could plausibly belong to two
/// canonical fields, the earlier entry wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorFieldMap {
    pub vendor: Vendor,
    pub fields: Vec<FieldAliases>,
    /// Canonical fields a file from this vendor must map before any row
    /// can be extracted.
    pub required: Vec<CanonicalField>,
    /// Prefixes of order-reference codes this vendor embeds in its
    /// reference columns (e.g. FedEx "M" numbers, UPS "LOLA" ids).
    pub reference_prefixes: Vec<String>,
}

impl VendorFieldMap {
    /// Normalized alias keys for every field, preserving declaration order.
    pub fn normalized_aliases(&self) -> Vec<(CanonicalField, Vec<String>)> {
        self.fields
            .iter()
            .map(|entry| {
                let keys = entry.aliases.iter().map(|a| normalize_key(a)).collect();
                (entry.field, keys)
            })
            .collect()
    }
}

fn aliases(field: CanonicalField, names: &[&str]) -> FieldAliases {
    FieldAliases {
        field,
        aliases: names.iter().map(|n| (*n).to_string()).collect(),
    }
}

/// FedEx invoice export layout, with the header drift seen across months.
pub fn fedex_field_map() -> VendorFieldMap {
    VendorFieldMap {
        vendor: Vendor::Fedex,
        fields: vec![
            aliases(
                CanonicalField::TrackingNumber,
                &["Tracking Number", "Tracking #", "Express or Ground Tracking ID"],
            ),
            aliases(CanonicalField::InvoiceDate, &["Invoice Date"]),
            aliases(CanonicalField::ShipDate, &["Ship Date", "Shipment Date"]),
            aliases(CanonicalField::ServiceType, &["Service Type", "Service"]),
            aliases(
                CanonicalField::ShippingCost,
                &["Net Charge", "Net Chg", "Net Charge Amount"],
            ),
            aliases(CanonicalField::ActualWeight, &["Actual Weight", "Actual Wt"]),
            aliases(CanonicalField::BilledWeight, &["Billed Weight", "Rated Weight"]),
            aliases(
                CanonicalField::RecipientName,
                &["Recipient Company", "Recipient Name", "Recipient"],
            ),
            aliases(CanonicalField::RecipientState, &["Recipient State"]),
            aliases(
                CanonicalField::RecipientZip,
                &["Recipient Zipcode", "Recipient Zip Code", "Recipient Zip"],
            ),
            aliases(CanonicalField::RecipientCountry, &["Recipient Country"]),
            aliases(CanonicalField::Reference1, &["Reference 1", "Ref 1"]),
            aliases(CanonicalField::Reference2, &["Reference 2", "Ref 2"]),
            aliases(CanonicalField::Reference4, &["Reference 4", "Ref 4"]),
            aliases(CanonicalField::Zone, &["Zone"]),
            aliases(CanonicalField::PackageLength, &["Dim Length"]),
            aliases(CanonicalField::PackageWidth, &["Dim Width"]),
            aliases(CanonicalField::PackageHeight, &["Dim Height"]),
        ],
        required: CanonicalField::REQUIRED.to_vec(),
        reference_prefixes: vec!["M".to_string()],
    }
}

/// UPS invoice export layout.
pub fn ups_field_map() -> VendorFieldMap {
    VendorFieldMap {
        vendor: Vendor::Ups,
        fields: vec![
            aliases(CanonicalField::TrackingNumber, &["Tracking Number", "Tracking #"]),
            aliases(
                CanonicalField::InvoiceDate,
                &["Carrier Invoice Date", "Invoice Date"],
            ),
            aliases(CanonicalField::ShipDate, &["Pickup Date", "Ship Date"]),
            aliases(CanonicalField::ServiceType, &["Service", "Service Level"]),
            aliases(CanonicalField::ShippingCost, &["Shipping Cost", "Net Amount"]),
            aliases(CanonicalField::BilledWeight, &["Billed Weight"]),
            aliases(CanonicalField::RecipientName, &["Recipient Name", "Recipient"]),
            aliases(CanonicalField::RecipientState, &["Recipient State"]),
            aliases(
                CanonicalField::RecipientZip,
                &["Recipient Postal Code", "Recipient Zip"],
            ),
            aliases(CanonicalField::RecipientCountry, &["Recipient Country"]),
            aliases(CanonicalField::OriginState, &["Origin State"]),
            aliases(CanonicalField::Reference1, &["Reference 1", "Ref 1"]),
            aliases(CanonicalField::Reference2, &["Reference 2", "Ref 2"]),
        ],
        required: CanonicalField::REQUIRED.to_vec(),
        reference_prefixes: vec!["LOLA".to_string()],
    }
}

/// USPS export layout. The carrier portal's column set is still settling;
/// this covers the required fields so typed records are constructible, and
/// files missing them fail per-file with a missing-required-field error.
pub fn usps_field_map() -> VendorFieldMap {
    VendorFieldMap {
        vendor: Vendor::Usps,
        fields: vec![
            aliases(CanonicalField::TrackingNumber, &["Tracking Number", "Tracking #"]),
            aliases(CanonicalField::InvoiceDate, &["Invoice Date", "Print Date"]),
            aliases(CanonicalField::ShipDate, &["Ship Date", "Mail Date"]),
            aliases(CanonicalField::ServiceType, &["Service", "Mail Class"]),
            aliases(CanonicalField::ShippingCost, &["Cost", "Postage", "Amount"]),
            aliases(CanonicalField::BilledWeight, &["Weight", "Billed Weight"]),
            aliases(CanonicalField::RecipientName, &["Recipient", "Recipient Name"]),
            aliases(CanonicalField::RecipientState, &["Recipient State", "State"]),
            aliases(CanonicalField::RecipientZip, &["Recipient Zip", "Zip"]),
            aliases(CanonicalField::RecipientCountry, &["Recipient Country", "Country"]),
        ],
        required: CanonicalField::REQUIRED.to_vec(),
        reference_prefixes: Vec::new(),
    }
}

/// The full set of vendor maps for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorFieldMaps {
    maps: Vec<VendorFieldMap>,
}

impl VendorFieldMaps {
    /// Compiled-in defaults mirroring the current carrier exports.
    pub fn builtin() -> Self {
        Self {
            maps: vec![fedex_field_map(), ups_field_map(), usps_field_map()],
        }
    }

    pub fn new(maps: Vec<VendorFieldMap>) -> Self {
        Self { maps }
    }

    pub fn get(&self, vendor: Vendor) -> Option<&VendorFieldMap> {
        self.maps.iter().find(|map| map.vendor == vendor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VendorFieldMap> {
        self.maps.iter()
    }

    /// Every normalized alias key across all vendors. Header detection
    /// scores candidate rows against this set.
    pub fn all_alias_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for map in &self.maps {
            for entry in &map.fields {
                for alias in &entry.aliases {
                    keys.insert(normalize_key(alias));
                }
            }
        }
        keys
    }

    /// Reference-code prefixes across all vendors, for order-side index
    /// construction.
    pub fn all_reference_prefixes(&self) -> BTreeSet<String> {
        self.maps
            .iter()
            .flat_map(|map| map.reference_prefixes.iter().cloned())
            .collect()
    }

    /// Loads maps from a JSON document (an array of vendor maps), letting a
    /// run override the compiled-in tables without a rebuild.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let maps: Vec<VendorFieldMap> = serde_json::from_str(json)?;
        Ok(Self { maps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maps_cover_required_fields() {
        let maps = VendorFieldMaps::builtin();
        for map in maps.iter() {
            for field in &map.required {
                assert!(
                    map.fields.iter().any(|entry| entry.field == *field),
                    "{} map missing alias entry for required {field}",
                    map.vendor
                );
            }
        }
    }

    #[test]
    fn alias_keys_are_normalized() {
        let maps = VendorFieldMaps::builtin();
        let keys = maps.all_alias_keys();
        assert!(keys.contains("tracking_number"));
        assert!(keys.contains("net_charge"));
        assert!(keys.contains("carrier_invoice_date"));
    }

    #[test]
    fn maps_round_trip_through_json() {
        let maps = VendorFieldMaps::builtin();
        let json = serde_json::to_string(&maps.maps).unwrap();
        let loaded = VendorFieldMaps::from_json(&json).unwrap();
        assert_eq!(loaded.get(Vendor::Fedex).unwrap().fields.len(), 18);
    }
}
