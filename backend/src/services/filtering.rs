use crate::data::OrderTable;
use crate::models::{FilterSelection, OrderRecord, RegionSelector};

/// Keep rows whose purchase timestamp lies inside the selection's inclusive range.
pub fn filter_by_time_range<'a>(
    records: &'a [OrderRecord],
    selection: &FilterSelection,
) -> Vec<&'a OrderRecord> {
    records
        .iter()
        .filter(|r| selection.contains(r.order_purchase_timestamp))
        .collect()
}

/// Restrict rows to a single state unless the selector is `All`.
pub fn filter_by_state(rows: &mut Vec<&OrderRecord>, state: &RegionSelector) {
    if !state.is_all() {
        rows.retain(|r| state.matches(r.customer_state()));
    }
}

/// Restrict rows to a single city unless the selector is `All`.
///
/// Applied independently of the state filter: a city that does not belong to
/// the selected state just yields no rows.
pub fn filter_by_city(rows: &mut Vec<&OrderRecord>, city: &RegionSelector) {
    if !city.is_all() {
        rows.retain(|r| city.matches(r.customer_city()));
    }
}

/// Produce the filtered subset of the base table for a selection.
///
/// The subset borrows from the table and keeps the table's row order. An
/// empty result is a valid outcome, not an error.
pub fn filter_orders<'a>(table: &'a OrderTable, selection: &FilterSelection) -> Vec<&'a OrderRecord> {
    // Start with the time window
    let mut filtered = filter_by_time_range(table.records(), selection);

    // Then the region selectors
    filter_by_state(&mut filtered, &selection.state);
    filter_by_city(&mut filtered, &selection.city);

    filtered
}
