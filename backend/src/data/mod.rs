//! Loading and holding the base order table.
//!
//! ```text
//! CSV file ──► loader::read_csv (polars, text columns)
//!          ──► loader::dataframe_to_records (typed OrderRecord rows)
//!          ──► table::OrderTable (immutable, shared by reference)
//! ```
//!
//! The table is built once at startup and handed to the pipeline explicitly;
//! there is no global instance.

pub mod error;
pub mod loader;
pub mod table;

pub use error::{DataSourceError, DataSourceResult};
pub use loader::{dataframe_to_records, parse_timestamp, read_csv, OrderLoader};
pub use table::{OrderTable, TimestampBounds};
