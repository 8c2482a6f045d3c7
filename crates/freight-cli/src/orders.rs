//! CSV-backed order feed.
//!
//! The order system exports one row per order with its product quantity
//! vector. The feed treats this as already-clean input: a malformed file is
//! a feed failure (fatal to the run), not a data-quality event.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use freight_match::{DateRange, OrderFeed, OrderFeedError};
use freight_model::{OrderRecord, QuantityVector};

/// One row of the order export.
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    order_date: NaiveDate,
    customer_name: String,
    large: u32,
    medium: u32,
    baby: u32,
    xl_or_wtd: u32,
    lg_pet_bed: u32,
    pillow_square: u32,
    pillow_lumbar: u32,
    gift_bag: u32,
    other: u32,
    total_line_value: f64,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        OrderRecord {
            order_id: row.order_id,
            order_date: row.order_date,
            customer_name: row.customer_name,
            quantities: QuantityVector {
                large: row.large,
                medium: row.medium,
                baby: row.baby,
                xl_or_wtd: row.xl_or_wtd,
                lg_pet_bed: row.lg_pet_bed,
                pillow_square: row.pillow_square,
                pillow_lumbar: row.pillow_lumbar,
                gift_bag: row.gift_bag,
                other: row.other,
            },
            total_line_value: row.total_line_value,
        }
    }
}

/// Order feed reading a CSV export from disk.
#[derive(Debug, Clone)]
pub struct CsvOrderFeed {
    path: PathBuf,
}

impl CsvOrderFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OrderFeed for CsvOrderFeed {
    fn fetch(&self, range: DateRange) -> Result<Vec<OrderRecord>, OrderFeedError> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|error| {
            OrderFeedError::Unavailable(format!("{}: {error}", self.path.display()))
        })?;
        let mut orders = Vec::new();
        for row in reader.deserialize::<OrderRow>() {
            let row = row.map_err(|error| {
                OrderFeedError::Unavailable(format!("{}: {error}", self.path.display()))
            })?;
            if range.contains(row.order_date) {
                orders.push(OrderRecord::from(row));
            }
        }
        debug!(
            file = %self.path.display(),
            orders = orders.len(),
            "order feed window loaded"
        );
        Ok(orders)
    }
}
