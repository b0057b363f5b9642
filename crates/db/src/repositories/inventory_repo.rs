//! Repository for the `inventory_items` and `inventory_price_history` tables.

use sqlx::{PgConnection, PgPool};
use vaxal_core::inventory::MoveDirection;
use vaxal_core::types::{DbId, Timestamp};

use crate::models::inventory::{
    CreateInventoryItem, InventoryItem, PriceHistory, UpdateInventoryItem,
};

const COLUMNS: &str = "id, name, category, unit, stock_quantity, unit_price, display_order, \
    created_at, updated_at";

const HISTORY_COLUMNS: &str = "id, item_id, unit_price, effective_from, effective_to";

/// Outcome of a display-order move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item swapped positions with the neighbour `with`.
    Swapped { with: DbId },
    /// The item is already first (up) or last (down).
    AtEdge,
}

/// Provides CRUD, reordering, and price history for inventory items.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Insert an item at the end of the display order and open its first
    /// price history row at `now`.
    ///
    /// Concurrent creates are serialized on a table lock so each one reads a
    /// committed `MAX(display_order)`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInventoryItem,
        now: Timestamp,
    ) -> Result<InventoryItem, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("LOCK TABLE inventory_items IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO inventory_items (name, category, unit, stock_quantity, unit_price, display_order)
             VALUES ($1, $2, COALESCE($3, 'pcs'), COALESCE($4, 0), $5,
                     (SELECT COALESCE(MAX(display_order), 0) + 1 FROM inventory_items))
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, InventoryItem>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(input.stock_quantity)
            .bind(input.unit_price)
            .fetch_one(&mut *tx)
            .await?;

        Self::open_price_row(&mut tx, item.id, item.unit_price, now).await?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items WHERE id = $1");
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All items in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items ORDER BY display_order, id");
        sqlx::query_as::<_, InventoryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    ///
    /// When `unit_price` differs from the stored price, the open history row
    /// is closed at `now` and a new open row is inserted, all in the same
    /// transaction as the item update. Returns `None` if the item does not
    /// exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInventoryItem,
        now: Timestamp,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM inventory_items WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, InventoryItem>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE inventory_items SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                unit = COALESCE($4, unit),
                stock_quantity = COALESCE($5, stock_quantity),
                unit_price = COALESCE($6, unit_price)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(input.stock_quantity)
            .bind(input.unit_price)
            .fetch_one(&mut *tx)
            .await?;

        if item.unit_price != current.unit_price {
            sqlx::query(
                "UPDATE inventory_price_history SET effective_to = $2
                 WHERE item_id = $1 AND effective_to IS NULL",
            )
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            Self::open_price_row(&mut tx, id, item.unit_price, now).await?;
            tracing::debug!(
                item_id = id,
                old_price = current.unit_price,
                new_price = item.unit_price,
                "Inventory price changed"
            );
        }

        tx.commit().await?;
        Ok(Some(item))
    }

    /// Delete an item (its history cascades). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Swap `display_order` with the nearest neighbour in `direction`.
    ///
    /// Returns `None` if the item does not exist. Both rows are locked and
    /// updated in a single transaction.
    pub async fn move_item(
        pool: &PgPool,
        id: DbId,
        direction: MoveDirection,
    ) -> Result<Option<MoveOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<i32> =
            sqlx::query_scalar("SELECT display_order FROM inventory_items WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current_order) = current else {
            return Ok(None);
        };

        let neighbour_query = match direction {
            MoveDirection::Up => {
                "SELECT id, display_order FROM inventory_items
                 WHERE display_order < $1
                 ORDER BY display_order DESC, id DESC
                 LIMIT 1 FOR UPDATE"
            }
            MoveDirection::Down => {
                "SELECT id, display_order FROM inventory_items
                 WHERE display_order > $1
                 ORDER BY display_order ASC, id ASC
                 LIMIT 1 FOR UPDATE"
            }
        };
        let neighbour: Option<(DbId, i32)> = sqlx::query_as(neighbour_query)
            .bind(current_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some((neighbour_id, neighbour_order)) = neighbour else {
            tx.commit().await?;
            return Ok(Some(MoveOutcome::AtEdge));
        };

        Self::set_display_order(&mut tx, id, neighbour_order).await?;
        Self::set_display_order(&mut tx, neighbour_id, current_order).await?;

        tx.commit().await?;
        Ok(Some(MoveOutcome::Swapped { with: neighbour_id }))
    }

    /// Price history of an item, oldest first.
    pub async fn price_history(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Vec<PriceHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM inventory_price_history
             WHERE item_id = $1
             ORDER BY effective_from, id"
        );
        sqlx::query_as::<_, PriceHistory>(&query)
            .bind(item_id)
            .fetch_all(pool)
            .await
    }

    async fn open_price_row(
        conn: &mut PgConnection,
        item_id: DbId,
        unit_price: i64,
        effective_from: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO inventory_price_history (item_id, unit_price, effective_from)
             VALUES ($1, $2, $3)",
        )
        .bind(item_id)
        .bind(unit_price)
        .bind(effective_from)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn set_display_order(
        conn: &mut PgConnection,
        id: DbId,
        display_order: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE inventory_items SET display_order = $2 WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(conn)
            .await?;
        Ok(())
    }
}
