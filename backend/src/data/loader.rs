use chrono::{NaiveDate, NaiveDateTime, Timelike};
use log::{debug, info};
use polars::prelude::*;
use std::path::Path;

use super::error::{DataSourceError, DataSourceResult};
use super::table::OrderTable;
use crate::models::{OrderRecord, PartOfDay};

pub const ORDER_ID: &str = "order_id";
pub const ORDER_PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const CUSTOMER_STATE: &str = "customer_state";
pub const CUSTOMER_CITY: &str = "customer_city";
pub const PRODUCT_CATEGORY_NAME: &str = "product_category_name";
pub const ORDER_PURCHASE_PARTS_OF_DAY: &str = "order_purchase_parts_of_day";

/// Accepted layouts for the purchase timestamp, tried in order.
/// `%.f` also matches an absent fractional part.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Loads the base order table from CSV.
pub struct OrderLoader;

impl OrderLoader {
    /// Read a CSV file and build the base table.
    ///
    /// Fails if the file is missing, a required column is absent, or any
    /// purchase timestamp is unparseable. There is no per-row recovery.
    /// Empty text cells are kept as missing values.
    pub fn load_from_csv(csv_path: &Path) -> DataSourceResult<OrderTable> {
        let df = read_csv(csv_path)?;
        debug!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            csv_path.display()
        );

        let records = dataframe_to_records(&df)?;
        let table = OrderTable::new(records);

        match table.bounds() {
            Some(bounds) => info!(
                "Loaded {} order rows ({} distinct orders) spanning {} to {}",
                table.len(),
                table.distinct_order_count(),
                bounds.min,
                bounds.max
            ),
            None => info!("Loaded empty order table from {}", csv_path.display()),
        }

        Ok(table)
    }
}

/// Read a CSV file into a DataFrame with every column kept as text.
pub fn read_csv(csv_path: &Path) -> DataSourceResult<DataFrame> {
    if !csv_path.exists() {
        return Err(DataSourceError::NotFound {
            path: csv_path.to_path_buf(),
        });
    }

    // A zero-length inference window reads every column as String; typing
    // happens in `dataframe_to_records`.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataSourceError::Read {
            path: csv_path.to_path_buf(),
            source,
        })
}

/// Convert a text DataFrame into typed order records.
pub fn dataframe_to_records(df: &DataFrame) -> DataSourceResult<Vec<OrderRecord>> {
    let ids = text_column(df, ORDER_ID)?;
    let timestamps = text_column(df, ORDER_PURCHASE_TIMESTAMP)?;
    let states = text_column(df, CUSTOMER_STATE)?;
    let cities = text_column(df, CUSTOMER_CITY)?;
    let categories = text_column(df, PRODUCT_CATEGORY_NAME)?;
    let parts_of_day = optional_text_column(df, ORDER_PURCHASE_PARTS_OF_DAY)?;

    if parts_of_day.is_none() {
        debug!(
            "Column '{}' absent; deriving part of day from purchase hour",
            ORDER_PURCHASE_PARTS_OF_DAY
        );
    }

    let height = df.height();
    let mut records = Vec::with_capacity(height);

    for row in 0..height {
        let raw_timestamp = cell(timestamps, row).unwrap_or_default();
        let order_purchase_timestamp =
            parse_timestamp(raw_timestamp).ok_or_else(|| DataSourceError::InvalidTimestamp {
                row,
                value: raw_timestamp.to_string(),
            })?;

        let order_purchase_parts_of_day = match parts_of_day.and_then(|col| cell(col, row)) {
            Some(label) => label.parse::<PartOfDay>().map_err(|_| {
                DataSourceError::invalid_value(ORDER_PURCHASE_PARTS_OF_DAY, row, label)
            })?,
            None => PartOfDay::from_hour(order_purchase_timestamp.hour()),
        };

        records.push(OrderRecord {
            order_id: owned_cell(ids, row),
            order_purchase_timestamp,
            customer_state: owned_cell(states, row),
            customer_city: owned_cell(cities, row),
            product_category_name: owned_cell(categories, row),
            order_purchase_parts_of_day,
        });
    }

    Ok(records)
}

/// Parse a purchase timestamp as a timezone-naive date-time.
///
/// A bare date is taken as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> DataSourceResult<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| DataSourceError::MissingColumn(name.to_string()))?;
    column.str().map_err(|source| DataSourceError::ColumnType {
        column: name.to_string(),
        source,
    })
}

fn optional_text_column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> DataSourceResult<Option<&'a StringChunked>> {
    match df.column(name) {
        Ok(column) => column
            .str()
            .map(Some)
            .map_err(|source| DataSourceError::ColumnType {
                column: name.to_string(),
                source,
            }),
        Err(_) => Ok(None),
    }
}

/// Cell text as written, `None` for a null or empty cell. Whitespace is data.
fn cell(column: &StringChunked, row: usize) -> Option<&str> {
    column.get(row).filter(|v| !v.is_empty())
}

fn owned_cell(column: &StringChunked, row: usize) -> Option<String> {
    cell(column, row).map(str::to_string)
}
