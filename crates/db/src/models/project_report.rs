//! Field report model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectReport {
    pub id: DbId,
    pub project_id: DbId,
    pub engineer_id: DbId,
    pub work_summary: String,
    pub has_remaining_work: bool,
    pub remaining_work_note: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for a field report. `project_id` and `engineer_id` come from
/// the path and the session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectReport {
    pub work_summary: String,
    #[serde(default)]
    pub has_remaining_work: bool,
    pub remaining_work_note: Option<String>,
}
