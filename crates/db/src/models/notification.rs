//! Notification model and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use vaxal_core::notification::{NotificationType, Recipient};
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub staff_user_id: Option<DbId>,
    pub engineer_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Everything needed to insert one notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient: Recipient,
    pub project_id: Option<DbId>,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    /// When set, a second insert with the same key is silently skipped.
    pub dedup_key: Option<String>,
}
