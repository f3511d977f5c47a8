//! # Sale Pricing
//!
//! Turns caller input into a priced sale.
//!
//! ## Flow
//! ```text
//! NewSale { wine_id: 1, product_type: bottle, quantity: 2 }
//!      │
//!      ▼
//! look up wine 1 ──► price_bottle = 299.99
//!      │                (wine missing → 0.00)
//!      ▼
//! unit_price = 299.99, total_amount = 2 × 299.99 = 599.98
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InventoryRecord, NewSale, ProductType, Sale};
use crate::Wine;

/// Prices a sale against the wine it references.
///
/// A missing wine prices the sale at zero rather than failing; the local
/// fallback never rejects a sale. A total beyond the range of `Money`
/// saturates.
pub fn price_sale(id: i64, new: NewSale, wine: Option<&Wine>, sale_date: DateTime<Utc>) -> Sale {
    let unit_price = unit_price(&new, wine);
    let total_amount = unit_price.multiply_quantity(new.quantity);
    build_sale(id, new, unit_price, total_amount, sale_date)
}

/// Like [`price_sale`] but refuses a total that does not fit.
///
/// ## Errors
/// `CoreError::AmountOverflow` when `quantity × unit_price` overflows.
pub fn try_price_sale(id: i64, new: NewSale, wine: Option<&Wine>, sale_date: DateTime<Utc>) -> CoreResult<Sale> {
    let unit_price = unit_price(&new, wine);
    let total_amount = unit_price
        .checked_multiply_quantity(new.quantity)
        .ok_or(CoreError::AmountOverflow {
            quantity: new.quantity,
            unit_price,
        })?;
    Ok(build_sale(id, new, unit_price, total_amount, sale_date))
}

fn unit_price(new: &NewSale, wine: Option<&Wine>) -> Money {
    wine.map(|w| new.product_type.price_of(w)).unwrap_or_default()
}

fn build_sale(id: i64, new: NewSale, unit_price: Money, total_amount: Money, sale_date: DateTime<Utc>) -> Sale {
    Sale {
        id,
        wine_id: new.wine_id,
        product_type: new.product_type,
        quantity: new.quantity,
        unit_price,
        total_amount,
        location: new.location,
        customer_name: new.customer_name,
        sale_date,
    }
}

/// Checks that a bottle sale can be served from the given inventory record.
///
/// Glass sales always pass; glasses are poured from open bottles that are
/// not tracked.
pub fn ensure_stock(new: &NewSale, record: Option<&InventoryRecord>) -> CoreResult<()> {
    if new.product_type == ProductType::Glass {
        return Ok(());
    }

    let available = record.map_or(0, |r| r.bottles_count);
    if record.is_none() || available < new.quantity {
        return Err(CoreError::InsufficientStock {
            wine_id: new.wine_id,
            location: new.location.clone(),
            available,
            requested: new.quantity,
        });
    }

    Ok(())
}

/// Revenue of a group of sales.
pub fn revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Money {
    sales.into_iter().map(|s| s.total_amount).sum()
}
