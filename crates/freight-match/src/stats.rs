//! Match-quality statistics for the run report.

use std::collections::BTreeMap;

use freight_model::{MatchResult, MatchTier, ReviewEntry, TierCounts, Vendor};

/// Default cap on the manual-review sample.
pub const DEFAULT_REVIEW_SAMPLE: usize = 25;

/// Aggregated reconciliation quality for one run.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    pub tiers_by_vendor: BTreeMap<Vendor, TierCounts>,
    pub match_rate_by_vendor: BTreeMap<Vendor, f64>,
    pub review_sample: Vec<ReviewEntry>,
}

/// Summarizes match results: tier distribution and match rate per vendor,
/// plus a bounded sample of unmatched/ambiguous shipments for review.
pub fn summarize_matches(results: &[MatchResult], sample_limit: usize) -> MatchStats {
    let mut tiers_by_vendor: BTreeMap<Vendor, TierCounts> = BTreeMap::new();
    let mut review_sample = Vec::new();

    for result in results {
        let counts = tiers_by_vendor.entry(result.vendor).or_default();
        *counts.entry(result.tier).or_insert(0) += 1;
        if !result.tier.is_matched() && review_sample.len() < sample_limit {
            review_sample.push(ReviewEntry {
                vendor: result.vendor,
                tracking_number: result.tracking_number.clone(),
                tier: result.tier,
                signal: result.matched_on,
                score: result.score,
            });
        }
    }

    let mut match_rate_by_vendor = BTreeMap::new();
    for (vendor, counts) in &tiers_by_vendor {
        let total: usize = counts.values().sum();
        let matched: usize = MatchTier::ALL
            .iter()
            .filter(|tier| tier.is_matched())
            .filter_map(|tier| counts.get(tier))
            .sum();
        if total > 0 {
            match_rate_by_vendor.insert(*vendor, matched as f64 / total as f64);
        }
    }

    MatchStats {
        tiers_by_vendor,
        match_rate_by_vendor,
        review_sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_model::MatchSignal;

    fn result(vendor: Vendor, tier: MatchTier) -> MatchResult {
        MatchResult {
            vendor,
            tracking_number: "T".to_string(),
            order_id: tier.is_matched().then(|| "1".to_string()),
            tier,
            matched_on: MatchSignal::None,
            score: None,
        }
    }

    #[test]
    fn rates_and_samples() {
        let results = vec![
            result(Vendor::Fedex, MatchTier::Exact),
            result(Vendor::Fedex, MatchTier::FuzzyHigh),
            result(Vendor::Fedex, MatchTier::Unmatched),
            result(Vendor::Ups, MatchTier::Ambiguous),
        ];
        let stats = summarize_matches(&results, 10);
        let fedex_rate = stats.match_rate_by_vendor[&Vendor::Fedex];
        assert!((fedex_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.match_rate_by_vendor[&Vendor::Ups], 0.0);
        assert_eq!(stats.review_sample.len(), 2);
    }

    #[test]
    fn sample_is_bounded() {
        let results: Vec<MatchResult> = (0..40)
            .map(|_| result(Vendor::Ups, MatchTier::Unmatched))
            .collect();
        let stats = summarize_matches(&results, DEFAULT_REVIEW_SAMPLE);
        assert_eq!(stats.review_sample.len(), DEFAULT_REVIEW_SAMPLE);
    }
}
