//! Wine handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use cellar_core::{NewWine, Wine, WinePatch};

use crate::error::ApiResult;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Wine>> {
    Json(state.store.wines().list().await)
}

/// Every new wine starts with an empty record in the warehouse.
pub async fn create(State(state): State<AppState>, Json(new): Json<NewWine>) -> Json<Wine> {
    let wine = state.store.wines().create_stocked(new).await;
    info!(id = wine.id, name = %wine.name, "Wine created");
    Json(wine)
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Wine>> {
    Ok(Json(state.store.wines().get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<WinePatch>,
) -> ApiResult<Json<Wine>> {
    Ok(Json(state.store.wines().update(id, &patch).await?))
}

/// Removes the wine with its inventory and sales. Unknown ids succeed too.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    if state.store.wines().delete_cascade(id).await {
        info!(id, "Wine deleted");
    }
    Json(json!({ "message": "Wine deleted successfully" }))
}
