//! Repository for the `calendar_events` table.

use sqlx::{PgConnection, PgPool};
use vaxal_core::calendar::{EVENT_AVAILABLE, EVENT_CONFIRMED};
use vaxal_core::types::{DbId, Timestamp};

use crate::models::calendar_event::{CalendarEvent, CreateCalendarEvent, UpdateCalendarEvent};

const COLUMNS: &str =
    "id, engineer_id, project_id, status, title, start_at, end_at, created_at, updated_at";

pub struct CalendarEventRepo;

impl CalendarEventRepo {
    /// Insert an engineer-declared `AVAILABLE` block.
    pub async fn create_available(
        pool: &PgPool,
        engineer_id: DbId,
        input: &CreateCalendarEvent,
    ) -> Result<CalendarEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_events (engineer_id, status, title, start_at, end_at)
             VALUES ($1, '{EVENT_AVAILABLE}', $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(engineer_id)
            .bind(&input.title)
            .bind(input.start_at)
            .bind(input.end_at)
            .fetch_one(pool)
            .await
    }

    /// Insert a system `CONFIRMED` booking for a project inside the caller's
    /// transaction.
    pub async fn create_confirmed(
        conn: &mut PgConnection,
        engineer_id: DbId,
        project_id: DbId,
        title: &str,
        start_at: Timestamp,
        end_at: Timestamp,
    ) -> Result<CalendarEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_events (engineer_id, project_id, status, title, start_at, end_at)
             VALUES ($1, $2, '{EVENT_CONFIRMED}', $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(engineer_id)
            .bind(project_id)
            .bind(title)
            .bind(start_at)
            .bind(end_at)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendar_events WHERE id = $1");
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Events of an engineer overlapping `[from, to)`, in start order.
    pub async fn list_for_engineer(
        pool: &PgPool,
        engineer_id: DbId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events
             WHERE engineer_id = $1 AND start_at < $3 AND end_at > $2
             ORDER BY start_at, id"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(engineer_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Update an `AVAILABLE` event owned by `engineer_id`. Confirmed bookings
    /// never match, so they are left untouched.
    pub async fn update_available(
        pool: &PgPool,
        id: DbId,
        engineer_id: DbId,
        input: &UpdateCalendarEvent,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_events SET
                title = COALESCE($3, title),
                start_at = COALESCE($4, start_at),
                end_at = COALESCE($5, end_at)
             WHERE id = $1 AND engineer_id = $2 AND status = '{EVENT_AVAILABLE}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .bind(engineer_id)
            .bind(&input.title)
            .bind(input.start_at)
            .bind(input.end_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an `AVAILABLE` event owned by `engineer_id`.
    pub async fn delete_available(
        pool: &PgPool,
        id: DbId,
        engineer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!(
            "DELETE FROM calendar_events
             WHERE id = $1 AND engineer_id = $2 AND status = '{EVENT_AVAILABLE}'"
        ))
        .bind(id)
        .bind(engineer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
