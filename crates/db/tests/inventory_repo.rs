//! Inventory repository: display-order swaps and price history.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use vaxal_core::inventory::MoveDirection;
use vaxal_db::models::inventory::{CreateInventoryItem, UpdateInventoryItem};
use vaxal_db::repositories::inventory_repo::MoveOutcome;
use vaxal_db::repositories::InventoryRepo;

fn item(name: &str, unit_price: i64) -> CreateInventoryItem {
    CreateInventoryItem {
        name: name.into(),
        category: None,
        unit: None,
        stock_quantity: None,
        unit_price,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_swaps_with_neighbour(pool: PgPool) {
    let now = Utc::now();
    let a = InventoryRepo::create(&pool, &item("A", 100), now).await.unwrap();
    let b = InventoryRepo::create(&pool, &item("B", 100), now).await.unwrap();
    assert!(a.display_order < b.display_order);

    let outcome = InventoryRepo::move_item(&pool, b.id, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(outcome, Some(MoveOutcome::Swapped { with: a.id }));

    let order: Vec<i64> = InventoryRepo::list(&pool)
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(order, vec![b.id, a.id]);

    let edge = InventoryRepo::move_item(&pool, b.id, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(edge, Some(MoveOutcome::AtEdge));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_unknown_item(pool: PgPool) {
    let outcome = InventoryRepo::move_item(&pool, 999, MoveDirection::Down)
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_creates_get_distinct_positions(pool: PgPool) {
    let now = Utc::now();
    let valve = item("Valve", 300);
    let gasket = item("Gasket", 50);
    let (first, second) = tokio::join!(
        InventoryRepo::create(&pool, &valve, now),
        InventoryRepo::create(&pool, &gasket, now),
    );
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first.display_order, second.display_order);

    let (upper, lower) = if first.display_order < second.display_order {
        (first, second)
    } else {
        (second, first)
    };
    let outcome = InventoryRepo::move_item(&pool, lower.id, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(outcome, Some(MoveOutcome::Swapped { with: upper.id }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_position_is_rejected(pool: PgPool) {
    let now = Utc::now();
    let a = InventoryRepo::create(&pool, &item("A", 100), now).await.unwrap();
    let b = InventoryRepo::create(&pool, &item("B", 100), now).await.unwrap();

    let err = sqlx::query("UPDATE inventory_items SET display_order = $2 WHERE id = $1")
        .bind(b.id)
        .bind(a.display_order)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.constraint() == Some("uq_inventory_items_display_order")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_price_change_keeps_one_open_row(pool: PgPool) {
    let t0 = Utc::now();
    let created = InventoryRepo::create(&pool, &item("Pipe", 1000), t0).await.unwrap();

    for (offset, price) in [(1, 1100), (2, 1200)] {
        InventoryRepo::update(
            &pool,
            created.id,
            &UpdateInventoryItem {
                unit_price: Some(price),
                ..Default::default()
            },
            t0 + Duration::minutes(offset),
        )
        .await
        .unwrap();
    }

    let history = InventoryRepo::price_history(&pool, created.id).await.unwrap();
    let prices: Vec<i64> = history.iter().map(|h| h.unit_price).collect();
    assert_eq!(prices, vec![1000, 1100, 1200]);
    assert_eq!(history.iter().filter(|h| h.effective_to.is_none()).count(), 1);
    assert_eq!(history[0].effective_to, Some(history[1].effective_from));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_open_row_is_rejected(pool: PgPool) {
    let created = InventoryRepo::create(&pool, &item("Pipe", 1000), Utc::now())
        .await
        .unwrap();
    let result = sqlx::query(
        "INSERT INTO inventory_price_history (item_id, unit_price, effective_from)
         VALUES ($1, 2000, NOW())",
    )
    .bind(created.id)
    .execute(&pool)
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}
