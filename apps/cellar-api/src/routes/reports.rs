//! Report handlers.

use axum::extract::State;
use axum::Json;

use cellar_core::reports::{self, InventoryByLocation, SalesByVintageRow};

use crate::AppState;

pub async fn sales_by_vintage(State(state): State<AppState>) -> Json<Vec<SalesByVintageRow>> {
    let wines = state.store.wines().list().await;
    let sales = state.store.sales().list().await;
    Json(reports::sales_by_vintage(&sales, &wines))
}

pub async fn inventory_by_location(State(state): State<AppState>) -> Json<InventoryByLocation> {
    let wines = state.store.wines().list().await;
    let inventory = state.store.inventory().list().await;
    Json(reports::inventory_by_location(&inventory, &wines))
}
