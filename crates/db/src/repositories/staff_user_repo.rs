//! Repository for the `staff_users` table.

use sqlx::PgPool;
use vaxal_core::types::DbId;

use crate::models::user::{CreateStaffUser, StaffUser, UpdateStaffUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, password_hash, role, is_active, created_at, updated_at";

/// Provides CRUD operations for staff accounts.
pub struct StaffUserRepo;

impl StaffUserRepo {
    /// Insert a new staff user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStaffUser) -> Result<StaffUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_users (email, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE id = $1");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup used by login.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all staff users ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users ORDER BY name, id");
        sqlx::query_as::<_, StaffUser>(&query).fetch_all(pool).await
    }

    /// Update a staff user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStaffUser,
    ) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!(
            "UPDATE staff_users SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
