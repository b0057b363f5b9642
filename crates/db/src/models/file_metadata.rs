//! Uploaded file metadata model and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `file_metadata` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileMetadata {
    pub id: DbId,
    pub project_id: DbId,
    pub storage_key: String,
    pub original_name: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by_staff_id: Option<DbId>,
    pub uploaded_by_engineer_id: Option<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFileMetadata {
    pub project_id: DbId,
    pub storage_key: String,
    pub original_name: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by_staff_id: Option<DbId>,
    pub uploaded_by_engineer_id: Option<DbId>,
}
