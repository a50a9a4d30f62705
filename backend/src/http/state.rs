//! Application state for the HTTP server.

use std::sync::Arc;

use crate::data::OrderTable;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Base order table, loaded once at startup and only ever read
    pub table: Arc<OrderTable>,
}

impl AppState {
    /// Create a new application state around a loaded table.
    pub fn new(table: Arc<OrderTable>) -> Self {
        Self { table }
    }
}
