//! Inventory item and price history models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `inventory_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryItem {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub stock_quantity: i32,
    /// Whole yen.
    pub unit_price: i64,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an item. It is appended at the end of the display order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventoryItem {
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub stock_quantity: Option<i32>,
    pub unit_price: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInventoryItem {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub stock_quantity: Option<i32>,
    pub unit_price: Option<i64>,
}

/// A row from the `inventory_price_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceHistory {
    pub id: DbId,
    pub item_id: DbId,
    pub unit_price: i64,
    pub effective_from: Timestamp,
    pub effective_to: Option<Timestamp>,
}
