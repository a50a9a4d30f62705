//! Grouped counts over a filtered subset.
//!
//! Every function here reads only the rows it is given and returns raw
//! `key -> count` pairs. Turning those into labelled tables is the job of
//! [`super::presentation`].
//!
//! Count sorts are stable over key-ascending input, so equal counts keep key
//! ascending order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{OrderRecord, PartOfDay};

/// Number of categories kept by the top and bottom rankings.
pub const CATEGORY_LIMIT: usize = 5;

/// One group and the number of rows in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: usize,
}

impl<K> GroupCount<K> {
    pub fn new(key: K, count: usize) -> Self {
        Self { key, count }
    }
}

/// Raw aggregates for one filtered subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAggregates {
    pub total_orders: usize,
    pub row_count: usize,
    pub orders_per_date: Vec<GroupCount<NaiveDate>>,
    pub top_categories: Vec<GroupCount<String>>,
    pub bottom_categories: Vec<GroupCount<String>>,
    pub orders_per_hour: Vec<GroupCount<u32>>,
    pub orders_per_part_of_day: Vec<GroupCount<PartOfDay>>,
}

/// Distinct order ids in the subset. Rows without an id are not counted.
pub fn total_orders(rows: &[&OrderRecord]) -> usize {
    rows.iter()
        .filter_map(|r| r.order_id())
        .collect::<HashSet<_>>()
        .len()
}

/// Rows per calendar date, date ascending.
pub fn orders_per_date(rows: &[&OrderRecord]) -> Vec<GroupCount<NaiveDate>> {
    count_by(rows.iter().map(|r| r.purchase_date()))
}

/// Rows per product category, category name ascending.
///
/// Rows without a category are not grouped.
pub fn category_counts(rows: &[&OrderRecord]) -> Vec<GroupCount<String>> {
    count_by(rows.iter().filter_map(|r| r.product_category_name.clone()))
}

/// The `limit` categories with the most rows.
pub fn top_categories(rows: &[&OrderRecord], limit: usize) -> Vec<GroupCount<String>> {
    let mut counts = category_counts(rows);
    sort_by_count_descending(&mut counts);
    counts.truncate(limit);
    counts
}

/// The `limit` categories with the fewest rows.
pub fn bottom_categories(rows: &[&OrderRecord], limit: usize) -> Vec<GroupCount<String>> {
    let mut counts = category_counts(rows);
    counts.sort_by(|a, b| a.count.cmp(&b.count));
    counts.truncate(limit);
    counts
}

/// Rows per hour of day, busiest hour first.
pub fn orders_per_hour(rows: &[&OrderRecord]) -> Vec<GroupCount<u32>> {
    let mut counts = count_by(rows.iter().map(|r| r.purchase_hour()));
    sort_by_count_descending(&mut counts);
    counts
}

/// Rows per part of day, ordered by label; not sorted by count.
pub fn orders_per_part_of_day(rows: &[&OrderRecord]) -> Vec<GroupCount<PartOfDay>> {
    let mut counts = count_by(rows.iter().map(|r| r.order_purchase_parts_of_day));
    counts.sort_by_key(|g| g.key.label());
    counts
}

/// Run every aggregation over the same subset.
pub fn aggregate(rows: &[&OrderRecord]) -> OrderAggregates {
    OrderAggregates {
        total_orders: total_orders(rows),
        row_count: rows.len(),
        orders_per_date: orders_per_date(rows),
        top_categories: top_categories(rows, CATEGORY_LIMIT),
        bottom_categories: bottom_categories(rows, CATEGORY_LIMIT),
        orders_per_hour: orders_per_hour(rows),
        orders_per_part_of_day: orders_per_part_of_day(rows),
    }
}

fn count_by<K, I>(keys: I) -> Vec<GroupCount<K>>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *groups.entry(key).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(key, count)| GroupCount::new(key, count))
        .collect()
}

fn sort_by_count_descending<K>(counts: &mut [GroupCount<K>]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
}
