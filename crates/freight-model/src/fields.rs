//! Canonical field names of the unified shipment schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A vendor-independent data point in the unified shipment schema.
///
/// Raw invoice headers resolve to these through a vendor's alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    TrackingNumber,
    InvoiceDate,
    ShipDate,
    ServiceType,
    ShippingCost,
    ActualWeight,
    BilledWeight,
    RecipientName,
    RecipientState,
    RecipientZip,
    RecipientCountry,
    OriginState,
    Reference1,
    Reference2,
    Reference4,
    Zone,
    PackageLength,
    PackageWidth,
    PackageHeight,
}

impl CanonicalField {
    /// Every canonical field, in schema order.
    pub const ALL: [CanonicalField; 19] = [
        CanonicalField::TrackingNumber,
        CanonicalField::InvoiceDate,
        CanonicalField::ShipDate,
        CanonicalField::ServiceType,
        CanonicalField::ShippingCost,
        CanonicalField::ActualWeight,
        CanonicalField::BilledWeight,
        CanonicalField::RecipientName,
        CanonicalField::RecipientState,
        CanonicalField::RecipientZip,
        CanonicalField::RecipientCountry,
        CanonicalField::OriginState,
        CanonicalField::Reference1,
        CanonicalField::Reference2,
        CanonicalField::Reference4,
        CanonicalField::Zone,
        CanonicalField::PackageLength,
        CanonicalField::PackageWidth,
        CanonicalField::PackageHeight,
    ];

    /// Fields that must be populated for a record to enter the
    /// consolidated set. Records missing any of these at the value level
    /// are routed to the rejects collection.
    pub const REQUIRED: [CanonicalField; 10] = [
        CanonicalField::TrackingNumber,
        CanonicalField::InvoiceDate,
        CanonicalField::ShipDate,
        CanonicalField::ServiceType,
        CanonicalField::ShippingCost,
        CanonicalField::BilledWeight,
        CanonicalField::RecipientName,
        CanonicalField::RecipientState,
        CanonicalField::RecipientZip,
        CanonicalField::RecipientCountry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::TrackingNumber => "tracking_number",
            CanonicalField::InvoiceDate => "invoice_date",
            CanonicalField::ShipDate => "ship_date",
            CanonicalField::ServiceType => "service_type",
            CanonicalField::ShippingCost => "shipping_cost",
            CanonicalField::ActualWeight => "actual_weight",
            CanonicalField::BilledWeight => "billed_weight",
            CanonicalField::RecipientName => "recipient_name",
            CanonicalField::RecipientState => "recipient_state",
            CanonicalField::RecipientZip => "recipient_zip",
            CanonicalField::RecipientCountry => "recipient_country",
            CanonicalField::OriginState => "origin_state",
            CanonicalField::Reference1 => "reference_1",
            CanonicalField::Reference2 => "reference_2",
            CanonicalField::Reference4 => "reference_4",
            CanonicalField::Zone => "zone",
            CanonicalField::PackageLength => "package_length",
            CanonicalField::PackageWidth => "package_width",
            CanonicalField::PackageHeight => "package_height",
        }
    }

    /// True for the fields in [`CanonicalField::REQUIRED`].
    pub fn is_required(&self) -> bool {
        CanonicalField::REQUIRED.contains(self)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
