//! Repository for the `projects` table.
//!
//! Status changes go through the conditional `mark_*` methods, which take a
//! `&mut PgConnection` so they can share a transaction with the notification
//! insert that accompanies each transition.

use sqlx::{PgConnection, PgPool};
use vaxal_core::project_status::{
    STATUS_ASSIGNED, STATUS_COMPLETED, STATUS_PENDING, STATUS_REPORTED,
};
use vaxal_core::types::{DbId, Timestamp};

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_number, customer_name, customer_phone, customer_email, \
    site_address, site_postal_code, work_category, description, status, engineer_id, \
    work_date, reported_at, completed_at, created_by, created_at, updated_at";

/// Shared WHERE clause for [`ProjectFilter`]; binds `$1..$3`.
const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR status = $1)
    AND ($2::BIGINT IS NULL OR engineer_id = $2)
    AND ($3::TEXT IS NULL
         OR project_number ILIKE '%' || $3 || '%'
         OR customer_name ILIKE '%' || $3 || '%')";

/// Provides CRUD and workflow operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new `PENDING` project together with its empty main-info row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        created_by: Option<DbId>,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (project_number, customer_name, customer_phone, customer_email, site_address,
                 site_postal_code, work_category, description, engineer_id, work_date,
                 status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, '{STATUS_PENDING}', $11)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.project_number)
            .bind(&input.customer_name)
            .bind(&input.customer_phone)
            .bind(&input.customer_email)
            .bind(&input.site_address)
            .bind(&input.site_postal_code)
            .bind(&input.work_category)
            .bind(&input.description)
            .bind(input.engineer_id)
            .bind(input.work_date)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO main_infos (project_id) VALUES ($1)")
            .bind(project.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a project and take a row lock for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List projects matching `filter`, most recent work date first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE {FILTER_CLAUSE}
             ORDER BY work_date DESC NULLS FIRST, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&filter.status)
            .bind(filter.engineer_id)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count projects matching `filter` (for pagination totals).
    pub async fn count(pool: &PgPool, filter: &ProjectFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar(&query)
            .bind(&filter.status)
            .bind(filter.engineer_id)
            .bind(&filter.search)
            .fetch_one(pool)
            .await
    }

    /// List projects assigned to any of `engineer_ids`, nearest work date first.
    pub async fn list_for_engineers(
        pool: &PgPool,
        engineer_ids: &[DbId],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE engineer_id = ANY($1) AND status <> '{STATUS_PENDING}'
             ORDER BY work_date ASC NULLS LAST, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(engineer_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_engineers(
        pool: &PgPool,
        engineer_ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM projects
             WHERE engineer_id = ANY($1) AND status <> '{STATUS_PENDING}'"
        );
        sqlx::query_scalar(&query)
            .bind(engineer_ids)
            .fetch_one(pool)
            .await
    }

    /// Update descriptive fields. Only non-`None` fields in `input` are applied.
    ///
    /// `engineer_id` and `work_date` are only written while the project is
    /// pending. Returns `None` if no row with the given `id` exists or the
    /// project has moved past pending and either of them is set.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                customer_name = COALESCE($2, customer_name),
                customer_phone = COALESCE($3, customer_phone),
                customer_email = COALESCE($4, customer_email),
                site_address = COALESCE($5, site_address),
                site_postal_code = COALESCE($6, site_postal_code),
                work_category = COALESCE($7, work_category),
                description = COALESCE($8, description),
                engineer_id = COALESCE($9, engineer_id),
                work_date = COALESCE($10, work_date)
             WHERE id = $1
               AND (status = '{STATUS_PENDING}' OR ($9::BIGINT IS NULL AND $10::TIMESTAMPTZ IS NULL))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.customer_name)
            .bind(&input.customer_phone)
            .bind(&input.customer_email)
            .bind(&input.site_address)
            .bind(&input.site_postal_code)
            .bind(&input.work_category)
            .bind(&input.description)
            .bind(input.engineer_id)
            .bind(input.work_date)
            .fetch_optional(conn)
            .await
    }

    /// Delete a project that has not been assigned yet. Returns `true` if a
    /// row was removed.
    pub async fn delete_pending(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!(
            "DELETE FROM projects WHERE id = $1 AND status = '{STATUS_PENDING}'"
        ))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the assigned engineer on a still-pending project.
    pub async fn set_engineer(
        conn: &mut PgConnection,
        id: DbId,
        engineer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!(
            "UPDATE projects SET engineer_id = $2 WHERE id = $1 AND status = '{STATUS_PENDING}'"
        ))
        .bind(id)
        .bind(engineer_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `PENDING -> ASSIGNED`. Returns `None` if the project was no longer
    /// pending (or has no engineer), so concurrent assigns succeed only once.
    pub async fn mark_assigned(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = '{STATUS_ASSIGNED}'
             WHERE id = $1 AND status = '{STATUS_PENDING}' AND engineer_id IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Record a field report: move from `expected_status` to `next_status`
    /// and stamp `reported_at`.
    pub async fn mark_reported(
        conn: &mut PgConnection,
        id: DbId,
        expected_status: &str,
        next_status: &str,
        now: Timestamp,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $3, reported_at = $4
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(next_status)
            .bind(now)
            .fetch_optional(conn)
            .await
    }

    /// `REPORTED -> COMPLETED`, only when an engineer is assigned and no
    /// completion date was recorded before.
    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = '{STATUS_COMPLETED}', completed_at = $2
             WHERE id = $1
               AND status = '{STATUS_REPORTED}'
               AND engineer_id IS NOT NULL
               AND completed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(conn)
            .await
    }

    /// Assigned projects whose work date fell before `today_start` and that
    /// still have no report.
    pub async fn find_overdue(
        pool: &PgPool,
        today_start: Timestamp,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE work_date < $1
               AND status = '{STATUS_ASSIGNED}'
               AND engineer_id IS NOT NULL
             ORDER BY work_date, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(today_start)
            .fetch_all(pool)
            .await
    }
}
