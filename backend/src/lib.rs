//! # Order Dashboard Backend
//!
//! Filtering-and-aggregation engine for an e-commerce order dashboard.
//!
//! The crate loads a flat table of orders once, and for every filter
//! selection (date/hour range, state, city) recomputes the summaries a
//! dashboard shows: total orders, orders per date, top and bottom product
//! categories, orders per hour and orders per part of day.
//!
//! ## Architecture
//!
//! - [`models`]: order records, parts of day and the filter selection
//! - [`data`]: CSV loading (polars) and the immutable base table
//! - [`services`]: filter, aggregate and label; [`services::compute`] runs all three
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use order_dashboard::data::OrderLoader;
//! use order_dashboard::services;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = OrderLoader::load_from_csv(Path::new("all_data.csv"))?;
//! if let Some(selection) = table.default_selection() {
//!     let result = services::compute(&table, &selection.with_state("SP"));
//!     println!("{} orders", result.total_orders);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
