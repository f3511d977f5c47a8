//! # Reports
//!
//! Aggregations served by the backend's `/reports` routes.
//!
//! ```text
//! sales ──group by "name vintage"──► SalesByVintageRow  (first-seen order)
//! inventory ──group by location───► InventoryByLocation (sorted by location)
//! ```
//!
//! Rows referencing a wine that no longer exists are skipped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::revenue;
use crate::types::{InventoryRecord, ProductType, Sale, Wine};

/// One line of the sales-by-vintage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesByVintageRow {
    pub wine_name: String,
    pub vintage_year: i32,
    pub bottles_sold: i64,
    pub glasses_sold: i64,
    #[ts(type = "number")]
    pub total_revenue: Money,
}

/// One wine's stock at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocationStock {
    pub wine_name: String,
    pub vintage_year: i32,
    pub producer: String,
    pub bottles_count: i64,
    pub glasses_available: i64,
}

/// Location name → stock lines.
pub type InventoryByLocation = BTreeMap<String, Vec<LocationStock>>;

fn find_wine(wines: &[Wine], id: i64) -> Option<&Wine> {
    wines.iter().find(|w| w.id == id)
}

/// Groups sales by wine name and vintage.
///
/// Counts and revenue saturate instead of overflowing.
pub fn sales_by_vintage(sales: &[Sale], wines: &[Wine]) -> Vec<SalesByVintageRow> {
    let mut groups: Vec<(String, &Wine, Vec<&Sale>)> = Vec::new();

    for sale in sales {
        let Some(wine) = find_wine(wines, sale.wine_id) else {
            continue;
        };

        let key = format!("{} {}", wine.name, wine.vintage_year);
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, group)) => group.push(sale),
            None => groups.push((key, wine, vec![sale])),
        }
    }

    groups
        .into_iter()
        .map(|(_, wine, group)| {
            let sold = |product_type: ProductType| {
                group
                    .iter()
                    .filter(|s| s.product_type == product_type)
                    .fold(0i64, |acc, s| acc.saturating_add(s.quantity))
            };

            SalesByVintageRow {
                wine_name: wine.name.clone(),
                vintage_year: wine.vintage_year,
                bottles_sold: sold(ProductType::Bottle),
                glasses_sold: sold(ProductType::Glass),
                total_revenue: revenue(group.iter().copied()),
            }
        })
        .collect()
}

/// Groups inventory by location, with glasses available per wine.
///
/// A location is listed even when all of its wines are gone.
pub fn inventory_by_location(inventory: &[InventoryRecord], wines: &[Wine]) -> InventoryByLocation {
    let mut report = InventoryByLocation::new();

    for item in inventory {
        let lines = report.entry(item.location.clone()).or_default();
        if let Some(wine) = find_wine(wines, item.wine_id) {
            lines.push(LocationStock {
                wine_name: wine.name.clone(),
                vintage_year: wine.vintage_year,
                producer: wine.producer.clone(),
                bottles_count: item.bottles_count,
                glasses_available: item.bottles_count.saturating_mul(i64::from(wine.glasses_per_bottle)),
            });
        }
    }

    report
}
