//! HTTP server module for the dashboard backend.
//!
//! Exposes the filtering-and-aggregation pipeline as a small JSON API for a
//! chart frontend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing into a FilterSelection                   │
//! │  - JSON serialization, CORS, compression, error mapping   │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services::compute)                        │
//! │  - Filter, aggregate, label                               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Base table (data::OrderTable, shared via Arc)            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
