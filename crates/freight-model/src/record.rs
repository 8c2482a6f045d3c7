//! Canonical shipment records and row-level rejects.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;
use crate::vendor::Vendor;

/// Data-quality issue observed while cleaning a row.
///
/// Flags on a kept record mark degraded optional fields; flags on a reject
/// explain why the row left the main set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    CurrencyUnparsable,
    DateUnparsable,
    ZipUnparsable,
    StateUnrecognized,
    WeightUnparsable,
    DimensionUnparsable,
    MissingRequiredValue,
    MultiShipmentOrder,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::CurrencyUnparsable => "currency_unparsable",
            QualityFlag::DateUnparsable => "date_unparsable",
            QualityFlag::ZipUnparsable => "zip_unparsable",
            QualityFlag::StateUnrecognized => "state_unrecognized",
            QualityFlag::WeightUnparsable => "weight_unparsable",
            QualityFlag::DimensionUnparsable => "dimension_unparsable",
            QualityFlag::MissingRequiredValue => "missing_required_value",
            QualityFlag::MultiShipmentOrder => "multi_shipment_order",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One shipment in the unified schema.
///
/// Created once per extracted row. The only permitted mutation afterwards is
/// appending to `quality_flags`; every other field is set at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub vendor: Vendor,
    pub tracking_number: String,
    pub invoice_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub service_type: String,
    /// Net charge in USD, rounded to cents.
    pub shipping_cost: f64,
    pub actual_weight: Option<f64>,
    pub billed_weight: f64,
    pub recipient_name: String,
    pub recipient_state: String,
    pub recipient_zip: String,
    pub recipient_country: String,
    pub origin_state: Option<String>,
    pub reference_1: Option<String>,
    pub reference_2: Option<String>,
    pub reference_4: Option<String>,
    /// Carrier zone with leading zeros stripped.
    pub zone: Option<String>,
    pub package_length: Option<f64>,
    pub package_width: Option<f64>,
    pub package_height: Option<f64>,
    /// File the row came from.
    pub source_file: String,
    /// Zero-based row index in the raw sheet.
    pub source_row: usize,
    pub quality_flags: BTreeSet<QualityFlag>,
}

impl ShipmentRecord {
    pub fn flag(&mut self, flag: QualityFlag) {
        self.quality_flags.insert(flag);
    }

    /// Key for exact-duplicate collapsing across files.
    pub fn dedup_key(&self) -> (Vendor, &str, NaiveDate) {
        (self.vendor, self.tracking_number.as_str(), self.invoice_date)
    }
}

/// A row excluded from the consolidated set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
    pub source_file: String,
    pub source_row: usize,
    pub vendor: Vendor,
    /// The required field whose value was missing or unusable.
    pub field: CanonicalField,
    pub flag: QualityFlag,
    /// Raw cell content, kept for manual review.
    pub raw_value: String,
}
