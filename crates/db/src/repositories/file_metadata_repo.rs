//! Repository for the `file_metadata` table.

use sqlx::{PgConnection, PgPool};
use vaxal_core::types::DbId;

use crate::models::file_metadata::{CreateFileMetadata, FileMetadata};

const COLUMNS: &str = "id, project_id, storage_key, original_name, content_type, size_bytes, \
    uploaded_by_staff_id, uploaded_by_engineer_id, created_at";

pub struct FileMetadataRepo;

impl FileMetadataRepo {
    /// Insert a metadata row. Fails with `uq_file_metadata_storage_key` when
    /// the key is already registered.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateFileMetadata,
    ) -> Result<FileMetadata, sqlx::Error> {
        let query = format!(
            "INSERT INTO file_metadata
                (project_id, storage_key, original_name, content_type, size_bytes,
                 uploaded_by_staff_id, uploaded_by_engineer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileMetadata>(&query)
            .bind(input.project_id)
            .bind(&input.storage_key)
            .bind(&input.original_name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.uploaded_by_staff_id)
            .bind(input.uploaded_by_engineer_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FileMetadata>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM file_metadata WHERE id = $1");
        sqlx::query_as::<_, FileMetadata>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Files attached to a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FileMetadata>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM file_metadata WHERE project_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FileMetadata>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM file_metadata WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
