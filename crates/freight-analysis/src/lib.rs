//! Cost aggregation over matched shipment/order pairs.
//!
//! Consolidates shipments to one row per order, groups orders by their
//! exact product combination, and turns group costs into quantity-weighted
//! average shipping costs per category.

pub mod basket;
pub mod config;
pub mod consolidate;
pub mod weighted;

pub use basket::{SHARE_SUM_TOLERANCE, check_share_sums, group_baskets};
pub use config::AggregationConfig;
pub use consolidate::{ConsolidatedOrder, consolidate_orders};
pub use weighted::weighted_averages;
