//! Calendar event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `calendar_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalendarEvent {
    pub id: DbId,
    pub engineer_id: DbId,
    pub project_id: Option<DbId>,
    pub status: String,
    pub title: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for an engineer-declared availability block.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCalendarEvent {
    pub title: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCalendarEvent {
    pub title: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
}
