//! Quantity-weighted average cost computation.

use std::collections::BTreeMap;

use freight_model::{AggregateRow, ProductCategory, WeightedAverages};
use freight_normalize::round_cents;

/// Computes the final weighted averages across all basket rows.
///
/// For category `p`: Σ(units_p × count × cost_per_product) /
/// Σ(units_p × count), restricted to rows with a non-null
/// cost_per_product. Per-row `category_units` already carry the
/// units × count product, so the sums fold directly over rows.
pub fn weighted_averages(rows: &[AggregateRow]) -> WeightedAverages {
    let mut per_category = BTreeMap::new();
    for category in ProductCategory::ALL {
        let mut cost_sum = 0.0;
        let mut unit_sum = 0u64;
        for row in rows {
            let Some(cost_per_product) = row.cost_per_product else {
                continue;
            };
            let units = u64::from(row.units(category));
            if units == 0 {
                continue;
            }
            cost_sum += units as f64 * cost_per_product;
            unit_sum += units;
        }
        if unit_sum > 0 {
            per_category.insert(category, cost_sum / unit_sum as f64);
        }
    }

    let total_orders: usize = rows.iter().map(|row| row.count_of_orders).sum();
    let order_average = if total_orders > 0 {
        rows.iter()
            .map(|row| row.avg_order_shipping_cost * row.count_of_orders as f64)
            .sum::<f64>()
            / total_orders as f64
    } else {
        0.0
    };

    let mut blanket_cost_sum = 0.0;
    let mut blanket_unit_sum = 0u64;
    for row in rows {
        let Some(cost_per_product) = row.cost_per_product else {
            continue;
        };
        let units = u64::from(row.blanket_units);
        blanket_cost_sum += units as f64 * cost_per_product;
        blanket_unit_sum += units;
    }
    let blanket_average =
        (blanket_unit_sum > 0).then(|| blanket_cost_sum / blanket_unit_sum as f64);

    WeightedAverages {
        per_category,
        order_average: round_cents(order_average),
        blanket_average,
    }
}
