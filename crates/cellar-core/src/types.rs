//! # Domain Types
//!
//! Records held by the store, returned by the REST API and by the shim.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Wine       │   │ InventoryRecord │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  wine_id        │   │  wine_id ──────►│ Wine  │
//! │  │  name, producer │   │  location       │   │  product_type   │       │
//! │  │  price_bottle   │   │  bottles_count  │   │  unit_price     │       │
//! │  │  price_glass    │   └─────────────────┘   │  total_amount   │       │
//! │  └─────────────────┘                         │  sale_date      │       │
//! │                                              └─────────────────┘       │
//! │  Inputs:  NewWine · WinePatch · InventoryPatch · NewSale               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `wine_id` references are logical only; nothing here checks them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::ids::Identified;
use crate::money::Money;
use crate::DEFAULT_LOCATION;

// =============================================================================
// Wine Type
// =============================================================================

/// Style of wine.
///
/// The set is open: values the front end invents are kept verbatim in
/// [`WineType::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WineType {
    Still,
    Sparkling,
    Rose,
    Dessert,
    Other(String),
}

impl WineType {
    pub fn as_str(&self) -> &str {
        match self {
            WineType::Still => "still",
            WineType::Sparkling => "sparkling",
            WineType::Rose => "rose",
            WineType::Dessert => "dessert",
            WineType::Other(other) => other,
        }
    }
}

impl From<String> for WineType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "still" => WineType::Still,
            "sparkling" => WineType::Sparkling,
            "rose" => WineType::Rose,
            "dessert" => WineType::Dessert,
            _ => WineType::Other(value),
        }
    }
}

impl From<&str> for WineType {
    fn from(value: &str) -> Self {
        WineType::from(value.to_string())
    }
}

impl From<WineType> for String {
    fn from(value: WineType) -> Self {
        match value {
            WineType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Wine
// =============================================================================

/// A wine in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Wine {
    pub id: i64,
    pub name: String,
    pub producer: String,
    pub country: String,
    pub region: String,
    pub vintage_year: i32,
    #[ts(type = "string")]
    pub wine_type: WineType,
    pub bottle_size_ml: i32,
    pub glasses_per_bottle: i32,
    /// Alcohol by volume, in percent.
    pub alcohol_content: f64,
    #[ts(type = "number")]
    pub price_bottle: Money,
    #[ts(type = "number")]
    pub price_glass: Money,
    #[serde(default)]
    pub description: String,
}

impl Wine {
    /// Builds a stored wine from creation input and an assigned id.
    pub fn from_new(id: i64, new: NewWine) -> Self {
        Wine {
            id,
            name: new.name,
            producer: new.producer,
            country: new.country,
            region: new.region,
            vintage_year: new.vintage_year,
            wine_type: new.wine_type,
            bottle_size_ml: new.bottle_size_ml,
            glasses_per_bottle: new.glasses_per_bottle,
            alcohol_content: new.alcohol_content,
            price_bottle: new.price_bottle,
            price_glass: new.price_glass,
            description: new.description,
        }
    }
}

impl Identified for Wine {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Wine fields supplied on creation; the id is always assigned for you.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewWine {
    pub name: String,
    pub producer: String,
    pub country: String,
    pub region: String,
    pub vintage_year: i32,
    #[ts(type = "string")]
    pub wine_type: WineType,
    pub bottle_size_ml: i32,
    pub glasses_per_bottle: i32,
    pub alcohol_content: f64,
    #[ts(type = "number")]
    pub price_bottle: Money,
    #[ts(type = "number")]
    pub price_glass: Money,
    #[serde(default)]
    pub description: String,
}

/// A partial wine update. Only the fields that are `Some` are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WinePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub wine_type: Option<WineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottle_size_ml: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glasses_per_bottle: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_content: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub price_bottle: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub price_glass: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WinePatch {
    /// Shallow merge: every supplied field overwrites, the rest stay put.
    /// The id is never touched.
    pub fn apply(&self, wine: &mut Wine) {
        if let Some(name) = &self.name {
            wine.name = name.clone();
        }
        if let Some(producer) = &self.producer {
            wine.producer = producer.clone();
        }
        if let Some(country) = &self.country {
            wine.country = country.clone();
        }
        if let Some(region) = &self.region {
            wine.region = region.clone();
        }
        if let Some(vintage_year) = self.vintage_year {
            wine.vintage_year = vintage_year;
        }
        if let Some(wine_type) = &self.wine_type {
            wine.wine_type = wine_type.clone();
        }
        if let Some(bottle_size_ml) = self.bottle_size_ml {
            wine.bottle_size_ml = bottle_size_ml;
        }
        if let Some(glasses) = self.glasses_per_bottle {
            wine.glasses_per_bottle = glasses;
        }
        if let Some(alcohol) = self.alcohol_content {
            wine.alcohol_content = alcohol;
        }
        if let Some(price) = self.price_bottle {
            wine.price_bottle = price;
        }
        if let Some(price) = self.price_glass {
            wine.price_glass = price;
        }
        if let Some(description) = &self.description {
            wine.description = description.clone();
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Bottles of one wine held at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryRecord {
    pub id: i64,
    pub wine_id: i64,
    /// Free-form: "warehouse", "bar", "cellar", "vip room", ...
    pub location: String,
    pub bottles_count: i64,
}

impl Identified for InventoryRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A partial inventory update keyed externally by wine id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottles_count: Option<i64>,
}

impl InventoryPatch {
    /// Patch that only sets the bottle count.
    pub fn bottles(count: i64) -> Self {
        InventoryPatch {
            location: None,
            bottles_count: Some(count),
        }
    }

    pub fn apply(&self, record: &mut InventoryRecord) {
        if let Some(location) = &self.location {
            record.location = location.clone();
        }
        if let Some(count) = self.bottles_count {
            record.bottles_count = count;
        }
    }

    /// Builds a fresh record carrying only what the caller supplied.
    pub fn into_record(self, id: i64, wine_id: i64) -> InventoryRecord {
        InventoryRecord {
            id,
            wine_id,
            location: self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            bottles_count: self.bottles_count.unwrap_or(0),
        }
    }
}

/// The backend's stock update: sets the bottle count and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryUpdate {
    pub bottles_count: i64,
}

impl From<InventoryUpdate> for InventoryPatch {
    fn from(update: InventoryUpdate) -> Self {
        InventoryPatch::bottles(update.bottles_count)
    }
}

// =============================================================================
// Product Type
// =============================================================================

/// How a wine was sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Bottle,
    Glass,
}

impl ProductType {
    /// Picks the matching price off a wine.
    pub fn price_of(&self, wine: &Wine) -> Money {
        match self {
            ProductType::Bottle => wine.price_bottle,
            ProductType::Glass => wine.price_glass,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Bottle => write!(f, "bottle"),
            ProductType::Glass => write!(f, "glass"),
        }
    }
}

impl FromStr for ProductType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bottle" => Ok(ProductType::Bottle),
            "glass" => Ok(ProductType::Glass),
            other => Err(CoreError::UnknownProductType(other.to_string())),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Amounts and date are always computed, never supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub wine_id: i64,
    pub product_type: ProductType,
    pub quantity: i64,
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub location: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(with = "crate::timestamp")]
    #[ts(type = "string")]
    pub sale_date: DateTime<Utc>,
}

impl Identified for Sale {
    fn id(&self) -> i64 {
        self.id
    }
}

/// What a caller supplies to record a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    pub wine_id: i64,
    pub product_type: ProductType,
    pub quantity: i64,
    pub location: String,
    #[serde(default)]
    pub customer_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_wine_type_is_open() {
        let parsed: WineType = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(parsed, WineType::Other("orange".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"orange\"");

        let known: WineType = serde_json::from_str("\"sparkling\"").unwrap();
        assert_eq!(known, WineType::Sparkling);
    }

    #[test]
    fn test_wine_patch_merges_only_supplied_fields() {
        let mut wine = fixtures::wines().remove(2);
        let before = wine.clone();

        let patch = WinePatch {
            price_bottle: Some(Money::from_decimal(99.50)),
            ..Default::default()
        };
        patch.apply(&mut wine);

        assert_eq!(wine.price_bottle.cents(), 9950);
        assert_eq!(wine.name, before.name);
        assert_eq!(wine.price_glass, before.price_glass);
        assert_eq!(wine.id, before.id);
    }

    #[test]
    fn test_wine_patch_serializes_sparse() {
        let patch = WinePatch {
            name: Some("Tignanello".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Tignanello" }));
    }

    #[test]
    fn test_inventory_patch_into_record_defaults() {
        let record = InventoryPatch::bottles(12).into_record(9, 42);
        assert_eq!(record.id, 9);
        assert_eq!(record.wine_id, 42);
        assert_eq!(record.location, DEFAULT_LOCATION);
        assert_eq!(record.bottles_count, 12);
    }

    #[test]
    fn test_inventory_update_requires_count_and_drops_location() {
        assert!(serde_json::from_str::<InventoryUpdate>(r#"{"location": "bar"}"#).is_err());

        let update: InventoryUpdate =
            serde_json::from_str(r#"{"bottles_count": 9, "location": "bar"}"#).unwrap();
        assert_eq!(InventoryPatch::from(update), InventoryPatch::bottles(9));
    }

    #[test]
    fn test_product_type_parsing() {
        assert_eq!("bottle".parse::<ProductType>().unwrap(), ProductType::Bottle);
        assert_eq!("Glass".parse::<ProductType>().unwrap(), ProductType::Glass);
        assert!("magnum".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_sale_round_trips_naive_fixture_date() {
        let json = r#"{
            "id": 1, "wine_id": 1, "product_type": "bottle", "quantity": 1,
            "unit_price": 299.99, "total_amount": 299.99, "location": "restaurant",
            "customer_name": "John Smith", "sale_date": "2023-05-15T18:30:00"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&sale).unwrap();
        assert_eq!(out["sale_date"], "2023-05-15T18:30:00.000Z");
        assert_eq!(out["total_amount"], 299.99);
    }
}
