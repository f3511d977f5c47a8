//! # Seed Dataset
//!
//! The records every fresh local store starts from: seven wines, one
//! inventory record per wine, and a week of sales.

use chrono::{DateTime, NaiveDate, Utc};

use crate::money::Money;
use crate::types::{InventoryRecord, ProductType, Sale, Wine, WineType};

#[allow(clippy::too_many_arguments)]
fn wine(
    id: i64,
    name: &str,
    producer: &str,
    country: &str,
    region: &str,
    vintage_year: i32,
    wine_type: WineType,
    bottle_size_ml: i32,
    glasses_per_bottle: i32,
    alcohol_content: f64,
    price_bottle: i64,
    price_glass: i64,
    description: &str,
) -> Wine {
    Wine {
        id,
        name: name.to_string(),
        producer: producer.to_string(),
        country: country.to_string(),
        region: region.to_string(),
        vintage_year,
        wine_type,
        bottle_size_ml,
        glasses_per_bottle,
        alcohol_content,
        price_bottle: Money::from_cents(price_bottle),
        price_glass: Money::from_cents(price_glass),
        description: description.to_string(),
    }
}

/// Seed wines, ids 1..=7.
pub fn wines() -> Vec<Wine> {
    vec![
        wine(1, "Château Margaux", "Château Margaux", "France", "Bordeaux", 2018,
            WineType::Still, 750, 5, 13.5, 29999, 1500, "Premium Bordeaux red wine"),
        wine(2, "Dom Pérignon", "Moët & Chandon", "France", "Champagne", 2016,
            WineType::Sparkling, 750, 6, 12.0, 19999, 1200, "Luxury champagne"),
        wine(3, "Sassicaia", "Tenuta San Guido", "Italy", "Tuscany", 2019,
            WineType::Still, 750, 5, 14.0, 14999, 1000, "Super Tuscan wine"),
        wine(4, "Opus One", "Opus One Winery", "USA", "Napa Valley", 2017,
            WineType::Still, 750, 5, 14.5, 24999, 1400, "Bordeaux-style blend"),
        wine(5, "Château d'Yquem", "Lur-Saluces", "France", "Bordeaux", 2015,
            WineType::Dessert, 375, 3, 14.0, 19999, 1800, "Sweet dessert wine"),
        wine(6, "Pinot Noir", "Domaine de la Romanée-Conti", "France", "Burgundy", 2018,
            WineType::Still, 750, 5, 13.0, 59999, 2500, "Exceptional Pinot Noir"),
        wine(7, "Prosecco", "Mionetto", "Italy", "Veneto", 2020,
            WineType::Sparkling, 750, 6, 11.0, 1999, 400, "Light and fruity prosecco"),
    ]
}

/// Seed inventory, one record per seed wine.
pub fn inventory() -> Vec<InventoryRecord> {
    [
        (1, "warehouse", 45),
        (2, "bar", 12),
        (3, "cellar", 30),
        (4, "restaurant", 18),
        (5, "warehouse", 25),
        (6, "vip room", 8),
        (7, "bar", 50),
    ]
    .into_iter()
    .map(|(id, location, bottles_count)| InventoryRecord {
        id,
        wine_id: id,
        location: location.to_string(),
        bottles_count,
    })
    .collect()
}

/// Seed sales, ids 1..=7.
pub fn sales() -> Vec<Sale> {
    use ProductType::{Bottle, Glass};

    [
        (1, 1, Bottle, 1, 29999, "restaurant", "John Smith", (15, 18, 30)),
        (2, 2, Glass, 2, 1200, "bar", "Emma Johnson", (16, 20, 15)),
        (3, 3, Bottle, 1, 14999, "restaurant", "Michael Brown", (17, 19, 45)),
        (4, 4, Glass, 3, 1400, "bar", "Sarah Davis", (18, 21, 20)),
        (5, 1, Bottle, 2, 29999, "restaurant", "Robert Wilson", (19, 17, 30)),
        (6, 7, Glass, 1, 400, "bar", "Lisa Miller", (20, 19, 10)),
        (7, 5, Bottle, 1, 19999, "vip room", "David Taylor", (21, 22, 0)),
    ]
    .into_iter()
    .map(
        |(id, wine_id, product_type, quantity, unit, location, customer, (day, h, m))| {
            let unit_price = Money::from_cents(unit);
            Sale {
                id,
                wine_id,
                product_type,
                quantity,
                unit_price,
                total_amount: unit_price.multiply_quantity(quantity),
                location: location.to_string(),
                customer_name: customer.to_string(),
                sale_date: may_2023(day, h, m),
            }
        },
    )
    .collect()
}

fn may_2023(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2023, 5, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
