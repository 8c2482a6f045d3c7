//! Shipment-to-order match outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fields::CanonicalField;
use crate::vendor::Vendor;

/// How confidently a shipment was linked to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    FuzzyHigh,
    FuzzyLow,
    Unmatched,
    Ambiguous,
}

impl MatchTier {
    pub const ALL: [MatchTier; 5] = [
        MatchTier::Exact,
        MatchTier::FuzzyHigh,
        MatchTier::FuzzyLow,
        MatchTier::Unmatched,
        MatchTier::Ambiguous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::FuzzyHigh => "fuzzy_high",
            MatchTier::FuzzyLow => "fuzzy_low",
            MatchTier::Unmatched => "unmatched",
            MatchTier::Ambiguous => "ambiguous",
        }
    }

    /// A tier that produced an order id.
    pub fn is_matched(&self) -> bool {
        matches!(
            self,
            MatchTier::Exact | MatchTier::FuzzyHigh | MatchTier::FuzzyLow
        )
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The signal that produced (or failed to produce) a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    /// A reference column held a recognized order code.
    Reference(CanonicalField),
    /// The tracking number itself resolved as an order code.
    TrackingNumber,
    /// Recipient-name similarity within the ship-date window.
    NameAndDate,
    /// Conflicting reference codes pointed at different orders.
    ConflictingReferences,
    /// Two fuzzy candidates scored too close to call.
    TiedCandidates,
    /// Nothing cleared the low similarity threshold.
    None,
}

impl MatchSignal {
    pub fn describe(&self) -> String {
        match self {
            MatchSignal::Reference(field) => format!("reference:{field}"),
            MatchSignal::TrackingNumber => "tracking_number".to_string(),
            MatchSignal::NameAndDate => "name_and_date".to_string(),
            MatchSignal::ConflictingReferences => "conflicting_references".to_string(),
            MatchSignal::TiedCandidates => "tied_candidates".to_string(),
            MatchSignal::None => "none".to_string(),
        }
    }
}

/// Immutable outcome of reconciling one shipment. Created once, never
/// revised; a re-run recomputes the whole set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub vendor: Vendor,
    pub tracking_number: String,
    pub order_id: Option<String>,
    pub tier: MatchTier,
    pub matched_on: MatchSignal,
    /// Similarity score for fuzzy tiers, absent for exact outcomes.
    pub score: Option<f64>,
}
