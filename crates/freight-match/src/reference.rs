//! Reference-code canonicalization.
//!
//! Order codes appear in carrier reference columns in several shapes:
//! bare numbers ("355467"), storefront numbers ("#355467"), FedEx
//! M-numbers ("M355467"), UPS LOLA ids ("LOLA355467"). Both the order
//! index and the shipment probes reduce every shape to the same canonical
//! key so exact matching is a plain lookup.

use std::collections::BTreeSet;

/// Canonicalizes one raw reference value.
///
/// Uppercases, strips `#` and every non-alphanumeric, then removes a
/// recognized code prefix when digits follow it. Returns `None` for
/// values with no alphanumeric content.
pub fn canonical_reference(raw: &str, prefixes: &BTreeSet<String>) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase();
    if compact.is_empty() {
        return None;
    }
    for prefix in prefixes {
        let prefix = prefix.to_uppercase();
        if let Some(rest) = compact.strip_prefix(&prefix)
            && !rest.is_empty()
            && rest.chars().all(|ch| ch.is_ascii_digit())
        {
            return Some(rest.to_string());
        }
    }
    Some(compact)
}

/// All canonical keys an order id should be findable under: the id itself
/// plus each prefixed shape a vendor might write it in.
pub fn order_reference_keys(order_id: &str, prefixes: &BTreeSet<String>) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    if let Some(canonical) = canonical_reference(order_id, prefixes) {
        keys.insert(canonical);
    }
    // Prefixed shapes canonicalize back to the bare id, so indexing the
    // bare key is sufficient; anything non-numeric stays as written.
    keys
}
