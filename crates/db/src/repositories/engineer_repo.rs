//! Repository for the `engineers` table.

use sqlx::PgPool;
use vaxal_core::types::DbId;

use crate::models::user::{CreateEngineer, Engineer, UpdateEngineer};

const COLUMNS: &str = "id, email, name, phone, password_hash, role, master_id, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for engineer accounts.
pub struct EngineerRepo;

impl EngineerRepo {
    /// Insert a new engineer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEngineer) -> Result<Engineer, sqlx::Error> {
        let query = format!(
            "INSERT INTO engineers (email, name, phone, password_hash, role, master_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Engineer>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.master_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Engineer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM engineers WHERE id = $1");
        sqlx::query_as::<_, Engineer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup used by login.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Engineer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM engineers WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Engineer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List engineers ordered by name. Inactive accounts are skipped unless
    /// `include_inactive` is set.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Engineer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM engineers
             WHERE ($1 OR is_active)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Engineer>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update an engineer. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEngineer,
    ) -> Result<Option<Engineer>, sqlx::Error> {
        let query = format!(
            "UPDATE engineers SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                role = COALESCE($4, role),
                master_id = COALESCE($5, master_id),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Engineer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.role)
            .bind(input.master_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// IDs of the engineers supervised by `master_id` (not including the master).
    pub async fn list_supervised_ids(
        pool: &PgPool,
        master_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM engineers WHERE master_id = $1 ORDER BY id")
            .bind(master_id)
            .fetch_all(pool)
            .await
    }
}
