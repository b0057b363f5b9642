//! Project (work order) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub project_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub site_address: Option<String>,
    pub site_postal_code: Option<String>,
    pub work_category: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub engineer_id: Option<DbId>,
    pub work_date: Option<Timestamp>,
    pub reported_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. New projects always start `PENDING`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub project_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub site_address: Option<String>,
    pub site_postal_code: Option<String>,
    pub work_category: Option<String>,
    pub description: Option<String>,
    pub engineer_id: Option<DbId>,
    pub work_date: Option<Timestamp>,
}

/// DTO for updating a project's descriptive fields. Status is never set here;
/// it only changes through the workflow operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub site_address: Option<String>,
    pub site_postal_code: Option<String>,
    pub work_category: Option<String>,
    pub description: Option<String>,
    pub engineer_id: Option<DbId>,
    pub work_date: Option<Timestamp>,
}

/// Listing filter for staff project queries.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub engineer_id: Option<DbId>,
    /// Case-insensitive substring match on project number or customer name.
    pub search: Option<String>,
}
