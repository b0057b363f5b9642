//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vaxal_core::types::{DbId, Timestamp};

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /vaxal/projects` filters.
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub engineer_id: Option<DbId>,
    /// Matches project number or customer name (case-insensitive substring).
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Notification listing (`?unread_only=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Time window for calendar listings (`?from=&to=`, RFC 3339).
#[derive(Debug, Deserialize)]
pub struct CalendarRangeParams {
    pub from: Timestamp,
    pub to: Timestamp,
}

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
