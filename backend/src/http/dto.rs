//! Data Transfer Objects for the HTTP API.
//!
//! The dashboard payload itself is [`DashboardResult`], which already
//! serializes; the types here cover the sidebar endpoints and query strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::data::OrderTable;
use crate::models::{FilterSelection, PartOfDay, RegionSelector, ALL_LABEL};

pub use crate::services::{DashboardResult, LabeledRow, LabeledTable};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Rows in the loaded order table
    pub rows: usize,
    /// Distinct orders in the loaded order table
    pub orders: usize,
}

/// Timestamp range of the loaded table, used to bound date pickers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsResponse {
    pub min_timestamp: Option<NaiveDateTime>,
    pub max_timestamp: Option<NaiveDateTime>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl From<&OrderTable> for BoundsResponse {
    fn from(table: &OrderTable) -> Self {
        let bounds = table.bounds();
        Self {
            min_timestamp: bounds.map(|b| b.min),
            max_timestamp: bounds.map(|b| b.max),
            min_date: bounds.map(|b| b.min.date()),
            max_date: bounds.map(|b| b.max.date()),
        }
    }
}

/// Selector options, `All` first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub options: Vec<String>,
}

impl OptionsResponse {
    pub fn with_all(values: Vec<String>) -> Self {
        let mut options = Vec::with_capacity(values.len() + 1);
        options.push(ALL_LABEL.to_string());
        options.extend(values);
        Self { options }
    }
}

/// Query parameters for the cities endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CitiesQuery {
    /// Restrict cities to this state (`All` or absent for every state)
    #[serde(default)]
    pub state: Option<String>,
}

/// One entry of the parts-of-day legend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartOfDayInfo {
    pub label: String,
    pub first_hour: u32,
    pub last_hour: u32,
}

impl From<PartOfDay> for PartOfDayInfo {
    fn from(part: PartOfDay) -> Self {
        let (first_hour, last_hour) = part.hour_range();
        Self {
            label: part.label().to_string(),
            first_hour,
            last_hour,
        }
    }
}

/// Query parameters for the dashboard endpoint.
///
/// Missing dates default to the table's first and last day, missing hours to
/// 0 and 23, missing regions to `All`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardQuery {
    /// Range start date (`YYYY-MM-DD`)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Range start hour (0-23)
    #[serde(default)]
    pub start_hour: Option<u32>,
    /// Range end date (`YYYY-MM-DD`)
    #[serde(default)]
    pub end_date: Option<String>,
    /// Range end hour (0-23), inclusive through its last second
    #[serde(default)]
    pub end_hour: Option<u32>,
    /// Customer state label or `All`
    #[serde(default)]
    pub state: Option<String>,
    /// Customer city label or `All`
    #[serde(default)]
    pub city: Option<String>,
}

impl DashboardQuery {
    /// Resolve the query against the table's defaults.
    pub fn to_selection(&self, table: &OrderTable) -> Result<FilterSelection, AppError> {
        let defaults = table.default_selection();

        let start_date = match self.start_date.as_deref() {
            Some(raw) => parse_date("start_date", raw)?,
            None => defaults
                .as_ref()
                .map(FilterSelection::start_date)
                .ok_or_else(|| required_on_empty_table("start_date"))?,
        };
        let end_date = match self.end_date.as_deref() {
            Some(raw) => parse_date("end_date", raw)?,
            None => defaults
                .as_ref()
                .map(FilterSelection::end_date)
                .ok_or_else(|| required_on_empty_table("end_date"))?,
        };

        let selection = FilterSelection::new(
            start_date,
            self.start_hour.unwrap_or(0),
            end_date,
            self.end_hour.unwrap_or(23),
        )?;

        Ok(selection
            .with_state(RegionSelector::from_option(self.state.as_deref()))
            .with_city(RegionSelector::from_option(self.city.as_deref())))
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        AppError::BadRequest(format!("{} must be a YYYY-MM-DD date, got '{}': {}", field, raw, e))
    })
}

fn required_on_empty_table(field: &str) -> AppError {
    AppError::BadRequest(format!("{} is required when the order table is empty", field))
}
