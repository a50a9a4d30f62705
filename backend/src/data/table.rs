//! The immutable base table of orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{FilterSelection, OrderRecord, RegionSelector};

/// Earliest and latest purchase timestamps in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampBounds {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

/// All order records, loaded once and never mutated.
///
/// Share it behind an `Arc` (or borrow it) rather than cloning; the pipeline
/// only ever reads from it.
#[derive(Debug, Clone, Default)]
pub struct OrderTable {
    records: Vec<OrderRecord>,
    bounds: Option<TimestampBounds>,
}

impl OrderTable {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        let bounds = compute_bounds(&records);
        Self { records, bounds }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min/max purchase timestamp, `None` for an empty table.
    pub fn bounds(&self) -> Option<TimestampBounds> {
        self.bounds
    }

    /// Number of distinct order ids across the whole table. Rows without an
    /// id are not counted.
    pub fn distinct_order_count(&self) -> usize {
        self.records
            .iter()
            .filter_map(OrderRecord::order_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct customer states in order of first appearance. Missing states
    /// are not offered.
    pub fn states(&self) -> Vec<String> {
        unique_in_order(self.records.iter().filter_map(OrderRecord::customer_state))
    }

    /// Distinct customer cities in order of first appearance, limited to
    /// `state` unless it is `All`.
    pub fn cities(&self, state: &RegionSelector) -> Vec<String> {
        unique_in_order(
            self.records
                .iter()
                .filter(|r| state.matches(r.customer_state()))
                .filter_map(OrderRecord::customer_city),
        )
    }

    /// Selection covering every day in the table, all hours, all regions.
    pub fn default_selection(&self) -> Option<FilterSelection> {
        self.bounds
            .map(|b| FilterSelection::covering(b.min.date(), b.max.date()))
    }
}

fn compute_bounds(records: &[OrderRecord]) -> Option<TimestampBounds> {
    let min = records.iter().map(|r| r.order_purchase_timestamp).min()?;
    let max = records.iter().map(|r| r.order_purchase_timestamp).max()?;
    Some(TimestampBounds { min, max })
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
