//! Staged shipment-to-order reconciliation.
//!
//! A small explicit state machine per shipment: stage 1 probes reference
//! codes for an exact hit; stage 2 falls back to recipient-name similarity
//! within a ship-date window. The engine never guesses: conflicting or
//! tied candidates come back ambiguous for manual review.

use chrono::Days;
use rapidfuzz::distance::jaro_winkler;
use tracing::trace;

use freight_model::{CanonicalField, MatchResult, MatchSignal, MatchTier, ShipmentRecord};
use freight_normalize::normalize_key;

use crate::order_index::OrderIndex;
use crate::reference::canonical_reference;

/// Tuning knobs for reconciliation. The similarity thresholds are starting
/// points to be tuned against real match-rate targets, not fixed truths.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    /// Half-width of the order-date window around the ship date.
    pub date_window_days: u64,
    /// Similarity at or above which a fuzzy match is high confidence.
    pub high_threshold: f64,
    /// Similarity at or above which a fuzzy match is kept at all.
    pub low_threshold: f64,
    /// Top-two score gap under which the result is ambiguous.
    pub ambiguity_epsilon: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            date_window_days: 2,
            high_threshold: 0.85,
            low_threshold: 0.65,
            ambiguity_epsilon: 0.01,
        }
    }
}

/// Reference columns probed in stage 1, in evidence order.
const PROBE_FIELDS: [CanonicalField; 3] = [
    CanonicalField::Reference1,
    CanonicalField::Reference2,
    CanonicalField::TrackingNumber,
];

fn probe_value(shipment: &ShipmentRecord, field: CanonicalField) -> Option<&str> {
    match field {
        CanonicalField::Reference1 => shipment.reference_1.as_deref(),
        CanonicalField::Reference2 => shipment.reference_2.as_deref(),
        CanonicalField::TrackingNumber => Some(shipment.tracking_number.as_str()),
        _ => None,
    }
}

fn signal_for(field: CanonicalField) -> MatchSignal {
    match field {
        CanonicalField::TrackingNumber => MatchSignal::TrackingNumber,
        other => MatchSignal::Reference(other),
    }
}

/// Reconciles one shipment against the order index.
///
/// Pure with respect to its inputs: the same shipment, index, and config
/// always produce the same result.
pub fn match_shipment(
    shipment: &ShipmentRecord,
    index: &OrderIndex,
    config: &MatchConfig,
) -> MatchResult {
    match exact_stage(shipment, index) {
        ExactOutcome::One { order_id, field } => MatchResult {
            vendor: shipment.vendor,
            tracking_number: shipment.tracking_number.clone(),
            order_id: Some(order_id),
            tier: MatchTier::Exact,
            matched_on: signal_for(field),
            score: None,
        },
        ExactOutcome::Conflicting => MatchResult {
            vendor: shipment.vendor,
            tracking_number: shipment.tracking_number.clone(),
            order_id: None,
            tier: MatchTier::Ambiguous,
            matched_on: MatchSignal::ConflictingReferences,
            score: None,
        },
        ExactOutcome::None => fuzzy_stage(shipment, index, config),
    }
}

enum ExactOutcome {
    One {
        order_id: String,
        field: CanonicalField,
    },
    Conflicting,
    None,
}

fn exact_stage(shipment: &ShipmentRecord, index: &OrderIndex) -> ExactOutcome {
    let mut found: Option<(String, CanonicalField)> = None;
    for field in PROBE_FIELDS {
        let Some(raw) = probe_value(shipment, field) else {
            continue;
        };
        let Some(key) = canonical_reference(raw, index.prefixes()) else {
            continue;
        };
        for position in index.lookup_reference(&key) {
            let order_id = index.order(position).order_id.clone();
            match &found {
                None => found = Some((order_id, field)),
                Some((existing, _)) if *existing == order_id => {}
                Some(_) => {
                    trace!(
                        tracking = %shipment.tracking_number,
                        "conflicting reference codes across probe fields"
                    );
                    return ExactOutcome::Conflicting;
                }
            }
        }
    }
    match found {
        Some((order_id, field)) => ExactOutcome::One { order_id, field },
        None => ExactOutcome::None,
    }
}

struct FuzzyCandidate {
    position: usize,
    score: f64,
}

fn fuzzy_stage(shipment: &ShipmentRecord, index: &OrderIndex, config: &MatchConfig) -> MatchResult {
    let window = Days::new(config.date_window_days);
    let from = shipment.ship_date.checked_sub_days(window);
    let to = shipment.ship_date.checked_add_days(window);
    let (Some(from), Some(to)) = (from, to) else {
        return unmatched(shipment);
    };

    let name_key = normalize_key(&shipment.recipient_name);
    if name_key.is_empty() {
        return unmatched(shipment);
    }

    let mut best: Option<FuzzyCandidate> = None;
    let mut runner_up: Option<f64> = None;
    for (position, candidate_key) in index.orders_in_window(from, to) {
        if candidate_key.is_empty() {
            continue;
        }
        let score = jaro_winkler::similarity(name_key.chars(), candidate_key.chars());
        match &mut best {
            Some(current) if score > current.score => {
                runner_up = Some(current.score);
                *current = FuzzyCandidate { position, score };
            }
            Some(current) => {
                if runner_up.is_none_or(|r| score > r) && position != current.position {
                    runner_up = Some(score);
                }
            }
            None => best = Some(FuzzyCandidate { position, score }),
        }
    }

    let Some(top) = best else {
        return unmatched(shipment);
    };
    if top.score < config.low_threshold {
        return unmatched(shipment);
    }
    if let Some(second) = runner_up
        && second >= config.low_threshold
        && (top.score - second) < config.ambiguity_epsilon
    {
        return MatchResult {
            vendor: shipment.vendor,
            tracking_number: shipment.tracking_number.clone(),
            order_id: None,
            tier: MatchTier::Ambiguous,
            matched_on: MatchSignal::TiedCandidates,
            score: Some(top.score),
        };
    }

    let tier = if top.score >= config.high_threshold {
        MatchTier::FuzzyHigh
    } else {
        MatchTier::FuzzyLow
    };
    MatchResult {
        vendor: shipment.vendor,
        tracking_number: shipment.tracking_number.clone(),
        order_id: Some(index.order(top.position).order_id.clone()),
        tier,
        matched_on: MatchSignal::NameAndDate,
        score: Some(top.score),
    }
}

fn unmatched(shipment: &ShipmentRecord) -> MatchResult {
    MatchResult {
        vendor: shipment.vendor,
        tracking_number: shipment.tracking_number.clone(),
        order_id: None,
        tier: MatchTier::Unmatched,
        matched_on: MatchSignal::None,
        score: None,
    }
}
