//! Presentation labels for the summary tables.
//!
//! Aggregation produces `key -> count` pairs; this module names the columns
//! and stringifies the keys for display.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::aggregation::GroupCount;
use crate::models::FilterSelection;

pub const TOTAL_ORDERS: &str = "Total Orders";
pub const ORDER_DATE: &str = "Order Date";
pub const PRODUCT_CATEGORY: &str = "Product Category";
pub const HOUR: &str = "Hour";
pub const PART_OF_DAY: &str = "Order By Part of Day";

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub key: String,
    pub value: usize,
}

/// A two-column summary table ready for a chart or grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTable {
    pub key_label: String,
    pub value_label: String,
    pub rows: Vec<LabeledRow>,
}

impl LabeledTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Sum of the value column.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }
}

/// Name the columns of a grouped count, keeping row order.
pub fn label_counts<K: Display>(key_label: &str, counts: &[GroupCount<K>]) -> LabeledTable {
    LabeledTable {
        key_label: key_label.to_string(),
        value_label: TOTAL_ORDERS.to_string(),
        rows: counts
            .iter()
            .map(|g| LabeledRow {
                key: g.key.to_string(),
                value: g.count,
            })
            .collect(),
    }
}

/// Caption shown above the orders-per-date chart.
pub fn date_chart_caption(selection: &FilterSelection) -> String {
    format!(
        "Number of Orders per Date {} To {}, States: {}, City: {}",
        selection.start(),
        selection.end(),
        selection.state,
        selection.city
    )
}
