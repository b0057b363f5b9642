//! Repository for the `notifications` table.

use sqlx::{PgConnection, PgPool};
use vaxal_core::notification::Recipient;
use vaxal_core::types::{DbId, Timestamp};

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, staff_user_id, engineer_id, project_id, notification_type, title, \
    message, is_read, read_at, created_at";

/// Recipient filter; binds `$1` (staff) and `$2` (engineer).
const RECIPIENT_CLAUSE: &str = "staff_user_id IS NOT DISTINCT FROM $1 \
    AND engineer_id IS NOT DISTINCT FROM $2";

/// Provides insert and read-state operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification inside the caller's transaction.
    ///
    /// Returns `None` when `dedup_key` is set and a notification with the same
    /// key already exists.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewNotification,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let (staff_user_id, engineer_id) = input.recipient.columns();
        let query = format!(
            "INSERT INTO notifications
                (staff_user_id, engineer_id, project_id, notification_type, title, message,
                 dedup_key)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (dedup_key) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(staff_user_id)
            .bind(engineer_id)
            .bind(input.project_id)
            .bind(input.kind.as_str())
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.dedup_key)
            .fetch_optional(conn)
            .await
    }

    /// Whether a notification of `notification_type` exists for `project_id`
    /// created at or after `since`.
    pub async fn exists_for_project_since(
        pool: &PgPool,
        project_id: DbId,
        notification_type: &str,
        since: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM notifications
                WHERE project_id = $1 AND notification_type = $2 AND created_at >= $3
             )",
        )
        .bind(project_id)
        .bind(notification_type)
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// List notifications for a recipient, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient: Recipient,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let (staff_user_id, engineer_id) = recipient.columns();
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE {RECIPIENT_CLAUSE} AND (NOT $3 OR is_read = false)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(staff_user_id)
            .bind(engineer_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every notification attached to a project (any recipient).
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given recipient
    /// and updated, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        recipient: Recipient,
    ) -> Result<bool, sqlx::Error> {
        let (staff_user_id, engineer_id) = recipient.columns();
        let query = format!(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE {RECIPIENT_CLAUSE} AND id = $3 AND is_read = false"
        );
        let result = sqlx::query(&query)
            .bind(staff_user_id)
            .bind(engineer_id)
            .bind(notification_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a recipient.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, recipient: Recipient) -> Result<u64, sqlx::Error> {
        let (staff_user_id, engineer_id) = recipient.columns();
        let query = format!(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE {RECIPIENT_CLAUSE} AND is_read = false"
        );
        let result = sqlx::query(&query)
            .bind(staff_user_id)
            .bind(engineer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread notifications for a recipient.
    pub async fn unread_count(pool: &PgPool, recipient: Recipient) -> Result<i64, sqlx::Error> {
        let (staff_user_id, engineer_id) = recipient.columns();
        let query = format!(
            "SELECT COUNT(*) FROM notifications WHERE {RECIPIENT_CLAUSE} AND is_read = false"
        );
        sqlx::query_scalar(&query)
            .bind(staff_user_id)
            .bind(engineer_id)
            .fetch_one(pool)
            .await
    }
}
