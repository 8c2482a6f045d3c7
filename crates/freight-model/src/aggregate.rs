//! Aggregated cost rows and the final weighted averages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::order::{ProductCategory, QuantityVector};

/// One basket combination's slice of the cost analysis.
///
/// Derived output, fully recomputed each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
    /// The exact product combination identifying this group.
    pub quantities: QuantityVector,
    /// Orders whose quantity vector equals `quantities`.
    pub count_of_orders: usize,
    /// Mean shipping cost per order in this group.
    pub avg_order_shipping_cost: f64,
    /// Units dividing the order cost into a per-product cost.
    pub total_items_for_weighting: u32,
    /// `avg_order_shipping_cost / total_items_for_weighting`, or `None`
    /// when the group has no billable units.
    pub cost_per_product: Option<f64>,
    /// This group's fraction of all attributed orders.
    pub orders_share: f64,
    /// Total units of each category contributed by this group.
    pub category_units: BTreeMap<ProductCategory, u32>,
    /// This group's fraction of each category's grand-total units.
    pub category_shares: BTreeMap<ProductCategory, f64>,
    pub blanket_units: u32,
    pub blanket_share: f64,
}

impl AggregateRow {
    pub fn units(&self, category: ProductCategory) -> u32 {
        self.category_units.get(&category).copied().unwrap_or(0)
    }

    pub fn share(&self, category: ProductCategory) -> f64 {
        self.category_shares.get(&category).copied().unwrap_or(0.0)
    }
}

/// Final quantity-weighted average costs across all baskets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedAverages {
    /// Weighted average shipping cost per unit, per category. Categories
    /// with no billable units in any group are absent.
    pub per_category: BTreeMap<ProductCategory, f64>,
    /// Frequency-weighted average shipping cost per order.
    pub order_average: f64,
    /// Weighted average cost per blanket unit of any blanket type.
    pub blanket_average: Option<f64>,
}
