//! Inventory handlers.
//!
//! The backend only updates existing records; it never creates one here.
//! Records come into being with their wine. An update sets the bottle count
//! and nothing else; a body without `bottles_count` is rejected by the
//! extractor.

use axum::extract::{Path, State};
use axum::Json;

use cellar_core::{InventoryPatch, InventoryRecord, InventoryUpdate};

use crate::error::ApiResult;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<InventoryRecord>> {
    Json(state.store.inventory().list().await)
}

pub async fn get_one(State(state): State<AppState>, Path(wine_id): Path<i64>) -> ApiResult<Json<InventoryRecord>> {
    Ok(Json(state.store.inventory().get(wine_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(wine_id): Path<i64>,
    Json(update): Json<InventoryUpdate>,
) -> ApiResult<Json<InventoryRecord>> {
    let patch = InventoryPatch::from(update);
    Ok(Json(state.store.inventory().update(wine_id, &patch).await?))
}
