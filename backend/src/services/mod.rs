//! Service layer: the filtering-and-aggregation pipeline.
//!
//! This module contains the business logic that sits between the loaded base
//! table and the HTTP handlers. [`dashboard::compute`] is the entry point;
//! the other modules are its stages and are usable on their own.

pub mod aggregation;
pub mod dashboard;
pub mod filtering;
pub mod presentation;

pub use aggregation::{aggregate, GroupCount, OrderAggregates, CATEGORY_LIMIT};
pub use dashboard::{compute, DashboardResult};
pub use filtering::filter_orders;
pub use presentation::{LabeledRow, LabeledTable};
