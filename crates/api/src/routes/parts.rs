//! Catalog lookups, exposed so clients can find part ids to order.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::{CatalogClient, Part, PartsFilter};
use common::PartId;
use serde::Serialize;

use super::{AppState, with_deadline};
use crate::error::ApiError;

#[derive(Serialize)]
pub struct ListPartsResponse {
    pub parts: Vec<Part>,
}

/// GET /api/v1/parts/{part_uuid}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(part_uuid): Path<String>,
) -> Result<Json<Part>, ApiError> {
    let id = PartId::new(part_uuid);
    let part = with_deadline(state.request_timeout, state.catalog.get_part(&id)).await?;
    Ok(Json(part))
}

/// POST /api/v1/parts/search
#[tracing::instrument(skip(state, filter))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(filter): Json<PartsFilter>,
) -> Result<Json<ListPartsResponse>, ApiError> {
    let parts = with_deadline(state.request_timeout, state.catalog.list_parts(&filter)).await?;
    Ok(Json(ListPartsResponse { parts }))
}
