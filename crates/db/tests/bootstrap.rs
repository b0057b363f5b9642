use sqlx::PgPool;

/// Connect, migrate, and verify every table is present.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vaxal_db::health_check(&pool).await.unwrap();

    let tables = [
        "staff_users",
        "engineers",
        "projects",
        "main_infos",
        "project_reports",
        "notifications",
        "inventory_items",
        "inventory_price_history",
        "calendar_events",
        "file_metadata",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The status CHECK constraint rejects unknown values.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_status_is_constrained(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO projects (project_number, status) VALUES ('VX-X', 'ARCHIVED')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
