use log::debug;
use serde::Serialize;

use super::aggregation::{aggregate, OrderAggregates};
use super::filtering::filter_orders;
use super::presentation::{
    date_chart_caption, label_counts, LabeledTable, HOUR, ORDER_DATE, PART_OF_DAY,
    PRODUCT_CATEGORY,
};
use crate::data::OrderTable;
use crate::models::FilterSelection;

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResult {
    pub selection: FilterSelection,
    pub caption: String,
    /// Distinct order ids in the filtered subset.
    pub total_orders: usize,
    /// Rows in the filtered subset (line items, not orders).
    pub matched_rows: usize,
    pub orders_per_date: LabeledTable,
    pub top_categories: LabeledTable,
    pub bottom_categories: LabeledTable,
    pub orders_per_hour: LabeledTable,
    pub orders_per_part_of_day: LabeledTable,
}

impl DashboardResult {
    /// Attach presentation labels to raw aggregates.
    pub fn from_aggregates(selection: &FilterSelection, aggregates: &OrderAggregates) -> Self {
        Self {
            selection: selection.clone(),
            caption: date_chart_caption(selection),
            total_orders: aggregates.total_orders,
            matched_rows: aggregates.row_count,
            orders_per_date: label_counts(ORDER_DATE, &aggregates.orders_per_date),
            top_categories: label_counts(PRODUCT_CATEGORY, &aggregates.top_categories),
            bottom_categories: label_counts(PRODUCT_CATEGORY, &aggregates.bottom_categories),
            orders_per_hour: label_counts(HOUR, &aggregates.orders_per_hour),
            orders_per_part_of_day: label_counts(PART_OF_DAY, &aggregates.orders_per_part_of_day),
        }
    }
}

/// Run the whole pipeline for one selection: filter, aggregate, label.
///
/// Pure with respect to `table`; calling it twice with the same selection
/// gives equal results.
pub fn compute(table: &OrderTable, selection: &FilterSelection) -> DashboardResult {
    let subset = filter_orders(table, selection);
    debug!(
        "Selection {} .. {} (state={}, city={}) matched {} of {} rows",
        selection.start(),
        selection.end(),
        selection.state,
        selection.city,
        subset.len(),
        table.len()
    );

    let aggregates = aggregate(&subset);
    DashboardResult::from_aggregates(selection, &aggregates)
}
