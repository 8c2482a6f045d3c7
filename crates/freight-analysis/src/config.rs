//! Aggregation configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use freight_model::{GiftBagWeighting, MatchTier};

/// Immutable knobs for cost attribution, passed explicitly into the
/// aggregation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Confidence tiers whose matches enter cost attribution. Low-confidence
    /// and unresolved shipments stay out of the averages by default.
    pub attributable_tiers: BTreeSet<MatchTier>,
    /// How gift bags weigh in the cost-per-product denominator.
    pub gift_bag: GiftBagWeighting,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            attributable_tiers: [MatchTier::Exact, MatchTier::FuzzyHigh].into_iter().collect(),
            gift_bag: GiftBagWeighting::default(),
        }
    }
}

impl AggregationConfig {
    /// Also attribute costs from low-confidence fuzzy matches.
    pub fn including_fuzzy_low(mut self) -> Self {
        self.attributable_tiers.insert(MatchTier::FuzzyLow);
        self
    }
}
