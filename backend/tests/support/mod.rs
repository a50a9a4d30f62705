#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use order_dashboard::data::OrderTable;
use order_dashboard::models::{OrderRecord, PartOfDay};
use tempfile::NamedTempFile;

pub const CSV_HEADER: &str = "order_id,order_purchase_timestamp,customer_state,customer_city,product_category_name,order_purchase_parts_of_day";

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid time")
}

/// Build a record with the part of day derived from the timestamp.
pub fn order(
    id: &str,
    timestamp: NaiveDateTime,
    state: &str,
    city: &str,
    category: Option<&str>,
) -> OrderRecord {
    use chrono::Timelike;
    OrderRecord {
        order_id: Some(id.to_string()),
        order_purchase_timestamp: timestamp,
        customer_state: Some(state.to_string()),
        customer_city: Some(city.to_string()),
        product_category_name: category.map(str::to_string),
        order_purchase_parts_of_day: PartOfDay::from_hour(timestamp.hour()),
    }
}

/// Ten orders, one per day from 2024-01-01 to 2024-01-10, all in SP.
pub fn ten_day_table() -> OrderTable {
    let cities = ["sao paulo", "campinas", "santos"];
    let categories = ["cama_mesa_banho", "beleza_saude", "esporte_lazer"];
    let records = (1..=10u32)
        .map(|day| {
            order(
                &format!("order-{day:02}"),
                at(2024, 1, day, (day * 5) % 24, 30),
                "SP",
                cities[(day as usize) % cities.len()],
                Some(categories[(day as usize) % categories.len()]),
            )
        })
        .collect();
    OrderTable::new(records)
}

/// A mixed table spanning several states, cities, categories and hours,
/// including repeated order ids and rows without a category.
pub fn mixed_table() -> OrderTable {
    OrderTable::new(vec![
        order("a1", at(2017, 11, 24, 10, 5), "SP", "sao paulo", Some("cama_mesa_banho")),
        order("a1", at(2017, 11, 24, 10, 5), "SP", "sao paulo", Some("beleza_saude")),
        order("a2", at(2017, 11, 24, 21, 40), "SP", "campinas", Some("cama_mesa_banho")),
        order("a3", at(2017, 11, 25, 3, 15), "RJ", "rio de janeiro", Some("esporte_lazer")),
        order("a4", at(2017, 11, 25, 14, 0), "RJ", "niteroi", None),
        order("a5", at(2017, 11, 26, 18, 20), "MG", "belo horizonte", Some("informatica_acessorios")),
        order("a6", at(2017, 11, 27, 9, 0), "SP", "sao paulo", Some("moveis_decoracao")),
        order("a7", at(2017, 11, 27, 9, 59), "PR", "curitiba", Some("relogios_presentes")),
        order("a8", at(2017, 11, 28, 23, 59), "SP", "santos", Some("telefonia")),
        order("a9", at(2017, 11, 29, 12, 0), "RS", "porto alegre", Some("cama_mesa_banho")),
    ])
}

pub fn csv_line(record: &OrderRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        record.order_id().unwrap_or(""),
        record.order_purchase_timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.customer_state().unwrap_or(""),
        record.customer_city().unwrap_or(""),
        record.product_category_name.as_deref().unwrap_or(""),
        record.order_purchase_parts_of_day
    )
}

/// Write records to a temporary CSV with the standard header.
pub fn write_table_csv(table: &OrderTable) -> NamedTempFile {
    let mut body = String::from(CSV_HEADER);
    body.push('\n');
    for record in table.records() {
        body.push_str(&csv_line(record));
        body.push('\n');
    }
    write_csv(&body)
}

pub fn write_csv(body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(body.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}
