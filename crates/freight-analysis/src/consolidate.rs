//! Per-order consolidation of matched shipments.
//!
//! One order can generate several shipping records (split shipments,
//! multiple packages). Cost analysis needs one row per order: shipping
//! costs sum, product quantities come from the order data and are never
//! duplicated, and the tracking numbers stay as an audit trail.

use std::collections::BTreeMap;

use tracing::debug;

use freight_model::{MatchResult, OrderRecord, QuantityVector, ShipmentRecord};
use freight_normalize::round_cents;

use crate::config::AggregationConfig;

/// One order with its total shipping spend.
#[derive(Debug, Clone)]
pub struct ConsolidatedOrder {
    pub order_id: String,
    pub quantities: QuantityVector,
    /// Sum of shipping costs across this order's attributed shipments.
    pub total_shipping_cost: f64,
    pub shipment_count: usize,
    /// Tracking numbers of every contributing shipment.
    pub tracking_numbers: Vec<String>,
}

impl ConsolidatedOrder {
    pub fn is_multi_shipment(&self) -> bool {
        self.shipment_count > 1
    }
}

/// Collapses attributable (shipment, match, order) triples to one
/// consolidated row per order id.
///
/// Only matches whose tier is in `config.attributable_tiers` participate;
/// everything else is already accounted for in the QC report.
pub fn consolidate_orders(
    pairs: &[(ShipmentRecord, MatchResult, OrderRecord)],
    config: &AggregationConfig,
) -> Vec<ConsolidatedOrder> {
    let mut by_order: BTreeMap<String, ConsolidatedOrder> = BTreeMap::new();
    for (shipment, result, order) in pairs {
        if !config.attributable_tiers.contains(&result.tier) {
            continue;
        }
        let entry = by_order
            .entry(order.order_id.clone())
            .or_insert_with(|| ConsolidatedOrder {
                order_id: order.order_id.clone(),
                quantities: order.quantities,
                total_shipping_cost: 0.0,
                shipment_count: 0,
                tracking_numbers: Vec::new(),
            });
        entry.total_shipping_cost = round_cents(entry.total_shipping_cost + shipment.shipping_cost);
        entry.shipment_count += 1;
        entry.tracking_numbers.push(shipment.tracking_number.clone());
    }

    let consolidated: Vec<ConsolidatedOrder> = by_order.into_values().collect();
    let multi = consolidated.iter().filter(|o| o.is_multi_shipment()).count();
    if multi > 0 {
        debug!(orders = consolidated.len(), multi_shipment = multi, "consolidated orders");
    }
    consolidated
}
