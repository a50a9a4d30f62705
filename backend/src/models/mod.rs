//! Domain types shared by the loader, the pipeline and the HTTP layer.

pub mod filter;
pub mod order;

pub use filter::{FilterError, FilterSelection, RegionSelector, ALL_LABEL};
pub use order::{OrderRecord, PartOfDay, UnknownPartOfDay};
