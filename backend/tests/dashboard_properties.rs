mod support;

use std::collections::HashSet;

use order_dashboard::data::OrderTable;
use order_dashboard::models::{FilterSelection, OrderRecord};
use order_dashboard::services::{self, aggregation, filter_orders, CATEGORY_LIMIT};
use proptest::prelude::*;

use support::{at, date, mixed_table, order, ten_day_table};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_first_five_days_of_ten() {
    let table = ten_day_table();
    let selection = FilterSelection::new(date(2024, 1, 1), 0, date(2024, 1, 5), 23).unwrap();

    let subset = filter_orders(&table, &selection);
    let days: Vec<_> = subset.iter().map(|r| r.purchase_date()).collect();
    assert_eq!(
        days,
        (1..=5).map(|d| date(2024, 1, d)).collect::<Vec<_>>()
    );

    let result = services::compute(&table, &selection);
    assert_eq!(result.total_orders, 5);
    assert_eq!(result.orders_per_date.len(), 5);
    assert_eq!(result.orders_per_date.keys()[0], "2024-01-01");
}

#[test]
fn test_inverted_range_gives_empty_dashboard() {
    let table = ten_day_table();
    let selection = FilterSelection::new(date(2024, 1, 8), 0, date(2024, 1, 2), 23).unwrap();

    assert!(filter_orders(&table, &selection).is_empty());

    let result = services::compute(&table, &selection);
    assert_eq!(result.total_orders, 0);
    assert!(result.orders_per_date.is_empty());
    assert!(result.top_categories.is_empty());
    assert!(result.bottom_categories.is_empty());
    assert!(result.orders_per_hour.is_empty());
    assert!(result.orders_per_part_of_day.is_empty());
}

#[test]
fn test_state_without_city_keeps_every_city() {
    let table = mixed_table();
    let selection = table.default_selection().unwrap().with_state("SP");

    let subset = filter_orders(&table, &selection);
    let expected: Vec<&OrderRecord> = table
        .records()
        .iter()
        .filter(|r| r.customer_state() == Some("SP"))
        .collect();
    assert_eq!(subset, expected);

    let cities: HashSet<&str> = subset.iter().filter_map(|r| r.customer_city()).collect();
    assert_eq!(cities.len(), 3);
}

#[test]
fn test_hour_window_edges() {
    let table = mixed_table();
    // 2017-11-27 09:00:00 through 2017-11-27 09:59:59
    let selection = FilterSelection::new(date(2017, 11, 27), 9, date(2017, 11, 27), 9).unwrap();
    let ids: Vec<&str> = filter_orders(&table, &selection)
        .iter()
        .filter_map(|r| r.order_id())
        .collect();
    assert_eq!(ids, vec!["a6", "a7"]);
}

#[test]
fn test_mismatched_city_after_state_change() {
    let table = mixed_table();
    let selection = table
        .default_selection()
        .unwrap()
        .with_state("RJ")
        .with_city("campinas");
    let result = services::compute(&table, &selection);
    assert_eq!(result.total_orders, 0);
    assert!(result.orders_per_hour.is_empty());
}

#[test]
fn test_parts_of_day_grouped_by_label() {
    let table = mixed_table();
    let result = services::compute(&table, &table.default_selection().unwrap());
    assert_eq!(
        result.orders_per_part_of_day.keys(),
        vec!["Afternoon", "Evening", "Morning", "Night"]
    );
    assert_eq!(result.orders_per_part_of_day.total(), 10);
}

#[test]
fn test_rows_with_blank_fields_stay_in_the_table() {
    let mut records = mixed_table().records().to_vec();
    let mut blank = order("b1", at(2017, 11, 26, 15, 0), "SP", "sao paulo", Some("perfumaria"));
    blank.order_id = None;
    blank.customer_city = None;
    records.push(blank);
    let table = OrderTable::new(records);
    let selection = table.default_selection().unwrap();

    let everything = services::compute(&table, &selection);
    assert_eq!(everything.matched_rows, 11);
    assert_eq!(everything.total_orders, 9);

    let sp = services::compute(&table, &selection.clone().with_state("SP"));
    assert_eq!(sp.matched_rows, 6);

    let sao_paulo = services::compute(&table, &selection.with_state("SP").with_city("sao paulo"));
    assert_eq!(sao_paulo.matched_rows, 3);
}

#[test]
fn test_few_categories_top_and_bottom_overlap() {
    let table = OrderTable::new(vec![
        order("a", at(2018, 1, 1, 10, 0), "SP", "santos", Some("livros")),
        order("b", at(2018, 1, 1, 11, 0), "SP", "santos", Some("livros")),
        order("c", at(2018, 1, 1, 12, 0), "SP", "santos", Some("bebes")),
    ]);
    let result = services::compute(&table, &table.default_selection().unwrap());
    assert_eq!(result.top_categories.keys(), vec!["livros", "bebes"]);
    assert_eq!(result.bottom_categories.keys(), vec!["bebes", "livros"]);
}

// =============================================================================
// Properties
// =============================================================================

const STATES: [&str; 3] = ["SP", "RJ", "MG"];
const CITIES: [&str; 4] = ["sao paulo", "campinas", "rio de janeiro", "belo horizonte"];
const CATEGORIES: [&str; 8] = [
    "beleza_saude",
    "cama_mesa_banho",
    "esporte_lazer",
    "informatica_acessorios",
    "moveis_decoracao",
    "relogios_presentes",
    "telefonia",
    "utilidades_domesticas",
];

fn record_strategy(category_pool: usize) -> impl Strategy<Value = OrderRecord> {
    (
        0u32..12,
        1u32..=10,
        0u32..24,
        0u32..60,
        0usize..STATES.len(),
        0usize..CITIES.len(),
        proptest::option::weighted(0.9, 0usize..category_pool),
    )
        .prop_map(|(id, day, hour, minute, state, city, category)| {
            let mut record = order(
                &format!("order-{id}"),
                at(2024, 3, day, hour, minute),
                STATES[state],
                CITIES[city],
                category.map(|c| CATEGORIES[c]),
            );
            // Spare slots stand for blank cells
            if id == 11 {
                record.order_id = None;
            }
            if city == 0 && state == 2 {
                record.customer_state = None;
            }
            record
        })
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (
        1u32..=10,
        0u32..24,
        1u32..=10,
        0u32..24,
        proptest::option::of(0usize..STATES.len()),
        proptest::option::of(0usize..CITIES.len()),
    )
        .prop_map(|(start_day, start_hour, end_day, end_hour, state, city)| {
            let mut selection =
                FilterSelection::new(date(2024, 3, start_day), start_hour, date(2024, 3, end_day), end_hour)
                    .expect("hours are in range");
            if let Some(s) = state {
                selection = selection.with_state(STATES[s]);
            }
            if let Some(c) = city {
                selection = selection.with_city(CITIES[c]);
            }
            selection
        })
}

fn table_strategy(category_pool: usize) -> impl Strategy<Value = OrderTable> {
    proptest::collection::vec(record_strategy(category_pool), 0..60).prop_map(OrderTable::new)
}

fn matches(selection: &FilterSelection, record: &OrderRecord) -> bool {
    selection.contains(record.order_purchase_timestamp)
        && selection.state.matches(record.customer_state())
        && selection.city.matches(record.customer_city())
}

proptest! {
    #[test]
    fn prop_subset_is_exactly_the_matching_rows(
        table in table_strategy(CATEGORIES.len()),
        selection in selection_strategy(),
    ) {
        let subset = filter_orders(&table, &selection);
        for row in &subset {
            prop_assert!(table.records().contains(row));
            prop_assert!(matches(&selection, row));
        }
        let expected = table.records().iter().filter(|r| matches(&selection, r)).count();
        prop_assert_eq!(subset.len(), expected);
    }

    #[test]
    fn prop_compute_is_idempotent(
        table in table_strategy(CATEGORIES.len()),
        selection in selection_strategy(),
    ) {
        prop_assert_eq!(
            services::compute(&table, &selection),
            services::compute(&table, &selection)
        );
    }

    #[test]
    fn prop_group_sums_equal_row_count(
        table in table_strategy(CATEGORIES.len()),
        selection in selection_strategy(),
    ) {
        let subset = filter_orders(&table, &selection);
        let aggregates = aggregation::aggregate(&subset);

        let distinct: HashSet<&str> = subset.iter().filter_map(|r| r.order_id()).collect();
        prop_assert_eq!(aggregates.total_orders, distinct.len());
        prop_assert!(aggregates.total_orders <= table.distinct_order_count());

        let per_hour: usize = aggregates.orders_per_hour.iter().map(|g| g.count).sum();
        let per_part: usize = aggregates.orders_per_part_of_day.iter().map(|g| g.count).sum();
        let per_date: usize = aggregates.orders_per_date.iter().map(|g| g.count).sum();
        prop_assert_eq!(per_hour, subset.len());
        prop_assert_eq!(per_part, subset.len());
        prop_assert_eq!(per_date, subset.len());
    }

    #[test]
    fn prop_category_rankings_are_bounded(
        table in table_strategy(CATEGORIES.len()),
        selection in selection_strategy(),
    ) {
        let subset = filter_orders(&table, &selection);
        let top = aggregation::top_categories(&subset, CATEGORY_LIMIT);
        let bottom = aggregation::bottom_categories(&subset, CATEGORY_LIMIT);

        prop_assert!(top.len() <= CATEGORY_LIMIT);
        prop_assert!(bottom.len() <= CATEGORY_LIMIT);
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(bottom.windows(2).all(|w| w[0].count <= w[1].count));
    }

    #[test]
    fn prop_few_categories_share_membership(
        table in table_strategy(5),
        selection in selection_strategy(),
    ) {
        let subset = filter_orders(&table, &selection);
        let top: HashSet<String> = aggregation::top_categories(&subset, CATEGORY_LIMIT)
            .into_iter()
            .map(|g| g.key)
            .collect();
        let bottom: HashSet<String> = aggregation::bottom_categories(&subset, CATEGORY_LIMIT)
            .into_iter()
            .map(|g| g.key)
            .collect();
        prop_assert_eq!(top, bottom);
    }
}
