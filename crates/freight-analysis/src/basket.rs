//! Basket grouping: orders with identical product combinations.

use std::collections::BTreeMap;

use tracing::info;

use freight_model::{AggregateRow, ProductCategory, QuantityVector, ShareCheck};
use freight_normalize::round_cents;

use crate::config::AggregationConfig;
use crate::consolidate::ConsolidatedOrder;

/// Tolerance for the share-sum sanity check.
pub const SHARE_SUM_TOLERANCE: f64 = 1e-6;

/// Groups consolidated orders by exact quantity vector and derives each
/// group's costs and shares.
///
/// Rows come back sorted by order count descending (most common baskets
/// first), with the vector as a deterministic tie-break so repeated runs
/// produce identical output.
pub fn group_baskets(
    orders: &[ConsolidatedOrder],
    config: &AggregationConfig,
) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<QuantityVector, Vec<&ConsolidatedOrder>> = BTreeMap::new();
    for order in orders {
        groups.entry(order.quantities).or_default().push(order);
    }

    let total_orders: usize = orders.len();
    let mut category_totals: BTreeMap<ProductCategory, u64> = BTreeMap::new();
    let mut blanket_total: u64 = 0;
    for (vector, members) in &groups {
        let count = members.len() as u64;
        for category in ProductCategory::ALL {
            *category_totals.entry(category).or_insert(0) +=
                u64::from(vector.get(category)) * count;
        }
        blanket_total += u64::from(vector.blanket_units()) * count;
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (vector, members) in &groups {
        let count = members.len();
        let cost_sum: f64 = members.iter().map(|o| o.total_shipping_cost).sum();
        let avg_order_shipping_cost = round_cents(cost_sum / count as f64);
        let billable = vector.billable_units(config.gift_bag);
        let cost_per_product = if billable > 0 {
            Some(avg_order_shipping_cost / f64::from(billable))
        } else {
            None
        };

        let mut category_units = BTreeMap::new();
        let mut category_shares = BTreeMap::new();
        for category in ProductCategory::ALL {
            let group_units = vector.get(category) * count as u32;
            category_units.insert(category, group_units);
            let total = category_totals.get(&category).copied().unwrap_or(0);
            if total > 0 {
                category_shares.insert(category, u64::from(group_units) as f64 / total as f64);
            }
        }

        let blanket_units = vector.blanket_units() * count as u32;
        let blanket_share = if blanket_total > 0 {
            u64::from(blanket_units) as f64 / blanket_total as f64
        } else {
            0.0
        };

        rows.push(AggregateRow {
            quantities: *vector,
            count_of_orders: count,
            avg_order_shipping_cost,
            total_items_for_weighting: billable,
            cost_per_product,
            orders_share: count as f64 / total_orders as f64,
            category_units,
            category_shares,
            blanket_units,
            blanket_share,
        });
    }

    rows.sort_by(|a, b| {
        b.count_of_orders
            .cmp(&a.count_of_orders)
            .then_with(|| a.quantities.cmp(&b.quantities))
    });
    info!(baskets = rows.len(), orders = total_orders, "grouped basket combinations");
    rows
}

/// Verifies every category's unit shares sum to one across all rows
/// (for categories with any units at all).
pub fn check_share_sums(rows: &[AggregateRow]) -> ShareCheck {
    let mut sums = BTreeMap::new();
    for category in ProductCategory::ALL {
        let has_units = rows.iter().any(|row| row.units(category) > 0);
        if !has_units {
            continue;
        }
        let sum: f64 = rows.iter().map(|row| row.share(category)).sum();
        sums.insert(category, sum);
    }
    let ok = sums
        .values()
        .all(|sum| (sum - 1.0).abs() <= SHARE_SUM_TOLERANCE);
    ShareCheck { sums, ok }
}
