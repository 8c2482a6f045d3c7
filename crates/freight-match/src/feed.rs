//! The external order feed.
//!
//! Retrieval is the one network-bound collaborator in a run. The pipeline
//! sees a trait; a failed fetch is fatal to the run, because a join against
//! a partial order set would make unmatched indistinguishable from
//! not-yet-available and corrupt the match-rate statistics.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use freight_model::OrderRecord;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Widens the range by `days` on each side. Orders can precede their
    /// shipping invoice by weeks, so the feed query buffers the invoice
    /// span rather than matching it exactly.
    pub fn buffered(&self, days: u64) -> Self {
        let buffer = Days::new(days);
        Self {
            from: self.from.checked_sub_days(buffer).unwrap_or(self.from),
            to: self.to.checked_add_days(buffer).unwrap_or(self.to),
        }
    }
}

/// Why the order feed could not be used.
#[derive(Debug, Error)]
pub enum OrderFeedError {
    #[error("order feed unavailable: {0}")]
    Unavailable(String),

    #[error("order feed returned no rows for {from}..{to}", from = .0.from, to = .0.to)]
    EmptyWindow(DateRange),
}

/// A source of order records covering a calendar timeframe.
///
/// Implementations hand back already-clean rows; the pipeline does not
/// re-clean feed data.
pub trait OrderFeed {
    fn fetch(&self, range: DateRange) -> Result<Vec<OrderRecord>, OrderFeedError>;
}

/// In-memory feed for tests and pre-loaded datasets.
#[derive(Debug, Default)]
pub struct StaticOrderFeed {
    orders: Vec<OrderRecord>,
}

impl StaticOrderFeed {
    pub fn new(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }
}

impl OrderFeed for StaticOrderFeed {
    fn fetch(&self, range: DateRange) -> Result<Vec<OrderRecord>, OrderFeedError> {
        Ok(self
            .orders
            .iter()
            .filter(|order| range.contains(order.order_date))
            .cloned()
            .collect())
    }
}
