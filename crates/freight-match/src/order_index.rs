//! Lookup structures over the external order set.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use freight_model::OrderRecord;
use freight_normalize::normalize_key;

use crate::reference::order_reference_keys;

/// Read-only indexes over one run's order records.
///
/// Built once after the order feed returns; reconciliation only reads it.
#[derive(Debug)]
pub struct OrderIndex {
    orders: Vec<OrderRecord>,
    /// Canonical reference key → positions of orders known under it.
    /// A multimap: a drifting code scheme can collide keys, and stage 1
    /// must see every candidate to detect ambiguity.
    by_reference: BTreeMap<String, BTreeSet<usize>>,
    /// Order date → positions, for windowed fuzzy scans.
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
    /// Order id → position, for pair building after matching.
    by_id: BTreeMap<String, usize>,
    /// Precomputed customer-name comparison keys, parallel to `orders`.
    name_keys: Vec<String>,
    /// Reference prefixes the index was built with; shipment probes use
    /// the same set so both sides canonicalize identically.
    prefixes: BTreeSet<String>,
}

impl OrderIndex {
    /// Builds both indexes from the full order set for the timeframe.
    pub fn build(orders: Vec<OrderRecord>, prefixes: BTreeSet<String>) -> Self {
        let mut by_reference: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        let mut by_id: BTreeMap<String, usize> = BTreeMap::new();
        let mut name_keys = Vec::with_capacity(orders.len());

        for (position, order) in orders.iter().enumerate() {
            for key in order_reference_keys(&order.order_id, &prefixes) {
                by_reference.entry(key).or_default().insert(position);
            }
            by_date.entry(order.order_date).or_default().push(position);
            by_id.entry(order.order_id.clone()).or_insert(position);
            name_keys.push(normalize_key(&order.customer_name));
        }

        Self {
            orders,
            by_reference,
            by_date,
            by_id,
            name_keys,
            prefixes,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn prefixes(&self) -> &BTreeSet<String> {
        &self.prefixes
    }

    pub fn order(&self, position: usize) -> &OrderRecord {
        &self.orders[position]
    }

    pub fn find_by_id(&self, order_id: &str) -> Option<&OrderRecord> {
        self.by_id
            .get(order_id)
            .map(|position| &self.orders[*position])
    }

    /// Orders registered under a canonical reference key.
    pub fn lookup_reference(&self, key: &str) -> impl Iterator<Item = usize> + '_ {
        self.by_reference
            .get(key)
            .into_iter()
            .flat_map(|positions| positions.iter().copied())
    }

    /// Orders whose order date falls in `[from, to]`, with their
    /// precomputed name keys.
    pub fn orders_in_window(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = (usize, &str)> {
        self.by_date
            .range(from..=to)
            .flat_map(|(_, positions)| positions.iter().copied())
            .map(|position| (position, self.name_keys[position].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_model::QuantityVector;

    fn order(id: &str, date: (i32, u32, u32), name: &str) -> OrderRecord {
        OrderRecord {
            order_id: id.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            customer_name: name.to_string(),
            quantities: QuantityVector::default(),
            total_line_value: 0.0,
        }
    }

    fn prefixes() -> BTreeSet<String> {
        ["M".to_string(), "LOLA".to_string()].into_iter().collect()
    }

    #[test]
    fn reference_lookup_covers_code_shapes() {
        let index = OrderIndex::build(
            vec![order("355467", (2025, 8, 1), "Sarah O'Brien")],
            prefixes(),
        );
        // The probe side canonicalizes "#355467"/"M355467" to "355467".
        let hits: Vec<usize> = index.lookup_reference("355467").collect();
        assert_eq!(hits, vec![0]);
        assert_eq!(index.lookup_reference("999999").count(), 0);
    }

    #[test]
    fn date_window_scan_is_inclusive() {
        let index = OrderIndex::build(
            vec![
                order("1", (2025, 8, 1), "A"),
                order("2", (2025, 8, 3), "B"),
                order("3", (2025, 8, 6), "C"),
            ],
            prefixes(),
        );
        let from = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        let in_window: Vec<usize> = index.orders_in_window(from, to).map(|(p, _)| p).collect();
        assert_eq!(in_window, vec![0, 1]);
    }
}
