//! Run-level quality-control reporting types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;
use crate::matching::{MatchSignal, MatchTier};
use crate::order::ProductCategory;
use crate::vendor::Vendor;

/// What happened to one discovered invoice file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum FileStatus {
    /// Extracted; `rows` is the count of kept records.
    Read { rows: usize },
    /// Excluded before reading (e.g. unknown vendor).
    Skipped { reason: String },
    /// Extraction failed; the run continued without it.
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file: String,
    pub vendor: Vendor,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Per-vendor distribution of match tiers.
pub type TierCounts = BTreeMap<MatchTier, usize>;

/// An unmatched or ambiguous shipment surfaced for manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub vendor: Vendor,
    pub tracking_number: String,
    pub tier: MatchTier,
    pub signal: MatchSignal,
    pub score: Option<f64>,
}

/// Sum of each category's unit shares across all aggregate rows.
///
/// For every category with non-zero total units the sum must be 1 within
/// floating tolerance; a failed check marks the aggregate suspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareCheck {
    pub sums: BTreeMap<ProductCategory, f64>,
    pub ok: bool,
}

/// The run report. Always produced, even when individual files fail;
/// only a missing order feed prevents a report (the run aborts instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub files: Vec<FileOutcome>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub rows_extracted: usize,
    pub rows_rejected: usize,
    /// Reject counts keyed by the required field that was missing.
    pub rejects_by_field: BTreeMap<CanonicalField, usize>,
    pub duplicates_removed: BTreeMap<Vendor, usize>,
    pub match_tiers: BTreeMap<Vendor, TierCounts>,
    /// Fraction of shipments in a matched tier, per vendor.
    pub match_rate: BTreeMap<Vendor, f64>,
    pub review_sample: Vec<ReviewEntry>,
    pub share_check: Option<ShareCheck>,
    /// Order-feed query window actually used (invoice span plus buffer).
    pub order_window: Option<(NaiveDate, NaiveDate)>,
}
