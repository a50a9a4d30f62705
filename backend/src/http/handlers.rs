//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual work.

use anyhow::Context;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::dto::{
    BoundsResponse, CitiesQuery, DashboardQuery, DashboardResult, HealthResponse,
    OptionsResponse, PartOfDayInfo,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{PartOfDay, RegionSelector};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint reporting the size of the loaded table.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        rows: state.table.len(),
        orders: state.table.distinct_order_count(),
    }))
}

// =============================================================================
// Sidebar Endpoints
// =============================================================================

/// GET /v1/bounds
///
/// First and last purchase timestamp in the table.
pub async fn get_bounds(State(state): State<AppState>) -> HandlerResult<BoundsResponse> {
    Ok(Json(BoundsResponse::from(state.table.as_ref())))
}

/// GET /v1/states
pub async fn list_states(State(state): State<AppState>) -> HandlerResult<OptionsResponse> {
    Ok(Json(OptionsResponse::with_all(state.table.states())))
}

/// GET /v1/cities?state=SP
///
/// Cities of the given state, or of every state when `state` is `All` or absent.
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> HandlerResult<OptionsResponse> {
    let selector = RegionSelector::from_option(query.state.as_deref());
    Ok(Json(OptionsResponse::with_all(state.table.cities(&selector))))
}

/// GET /v1/parts-of-day
///
/// Legend of the part-of-day buckets.
pub async fn list_parts_of_day() -> HandlerResult<Vec<PartOfDayInfo>> {
    Ok(Json(PartOfDay::ALL.into_iter().map(PartOfDayInfo::from).collect()))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Run the filtering-and-aggregation pipeline for one selection.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardResult> {
    let selection = query.to_selection(&state.table)?;
    let table = Arc::clone(&state.table);

    // The pipeline is CPU-bound; keep it off the async workers
    let data = tokio::task::spawn_blocking(move || services::compute(&table, &selection))
        .await
        .context("Dashboard task failed")?;

    Ok(Json(data))
}
