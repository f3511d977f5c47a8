//! Sale handlers.

use axum::extract::State;
use axum::Json;
use tracing::info;

use cellar_core::{NewSale, Sale};

use crate::error::ApiResult;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Sale>> {
    Json(state.store.sales().list().await)
}

/// Bottle sales draw down stock at the sale's location; glass sales do not.
pub async fn create(State(state): State<AppState>, Json(new): Json<NewSale>) -> ApiResult<Json<Sale>> {
    let sale = state.store.sales().sell(new).await?;
    info!(
        id = sale.id,
        wine_id = sale.wine_id,
        product_type = %sale.product_type,
        total = %sale.total_amount,
        "Sale recorded"
    );
    Ok(Json(sale))
}
