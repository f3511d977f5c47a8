//! Route table.
//!
//! ```text
//! GET    /                                   → {"message": "Wine Admin Panel API"}
//! GET    /health                             → "OK"
//!
//! GET    /api/wines                          → [Wine]
//! POST   /api/wines                          → Wine (+ empty warehouse stock)
//! GET    /api/wines/{id}                     → Wine             | 404
//! PUT    /api/wines/{id}                     → Wine             | 404
//! DELETE /api/wines/{id}                     → {"message": ...}   (cascades)
//!
//! GET    /api/inventory                      → [InventoryRecord]
//! GET    /api/inventory/{wine_id}            → InventoryRecord  | 404
//! PUT    /api/inventory/{wine_id}            → InventoryRecord  | 404
//!
//! GET    /api/sales                          → [Sale]
//! POST   /api/sales                          → Sale             | 404 | 400
//!
//! GET    /api/reports/sales-by-vintage       → [SalesByVintageRow]
//! GET    /api/reports/inventory-by-location  → {location: [LocationStock]}
//! ```

pub mod inventory;
pub mod reports;
pub mod sales;
pub mod wines;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;

/// Builds the full router over `state`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/wines", get(wines::list).post(wines::create))
        .route(
            "/wines/{id}",
            get(wines::get_one).put(wines::update).delete(wines::delete),
        )
        .route("/inventory", get(inventory::list))
        .route(
            "/inventory/{wine_id}",
            get(inventory::get_one).put(inventory::update),
        )
        .route("/sales", get(sales::list).post(sales::create))
        .route("/reports/sales-by-vintage", get(reports::sales_by_vintage))
        .route("/reports/inventory-by-location", get(reports::inventory_by_location));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Wine Admin Panel API" }))
}

async fn health() -> impl IntoResponse {
    "OK"
}
