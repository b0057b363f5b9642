//! Handlers for `/files`: project attachments in object storage.
//!
//! The preferred flow is presign, direct `PUT` to storage by the client, then
//! register. The multipart upload and delete routes are kept for older
//! clients that still send the file through the server.

use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;
use vaxal_core::error::CoreError;
use vaxal_core::roles::UserType;
use vaxal_core::storage::{storage_key, validate_storage_key};
use vaxal_core::types::DbId;
use vaxal_db::models::file_metadata::{CreateFileMetadata, FileMetadata};
use vaxal_db::repositories::FileMetadataRepo;

use crate::access::load_visible_project;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{ObjectStorage, PresignedUpload};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Deserialize, Validate)]
pub struct PresignRequest {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 127))]
    pub content_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFileRequest {
    pub project_id: DbId,
    pub storage_key: String,
    #[validate(length(min = 1, max = 255))]
    pub original_name: String,
    #[validate(length(min = 1, max = 127))]
    pub content_type: String,
    #[validate(range(min = 0))]
    pub size_bytes: Option<i64>,
}

/// Uploader columns for a new file row; exactly one is set.
fn uploader_columns(user: &AuthUser) -> (Option<DbId>, Option<DbId>) {
    match user.user_type {
        UserType::Vaxal => (Some(user.user_id), None),
        UserType::Engineer => (None, Some(user.user_id)),
    }
}

/// POST /api/files/presign
pub async fn presign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PresignRequest>,
) -> AppResult<Json<DataResponse<PresignedUpload>>> {
    input.validate()?;
    load_visible_project(&state.pool, &user, input.project_id).await?;

    let key = storage_key(Utc::now(), &input.file_name);
    let expires_in = Duration::from_secs(state.config.storage.presign_expiry_secs);
    let upload = state
        .storage
        .presign_put(&key, &input.content_type, expires_in)
        .await?;

    tracing::debug!(project_id = input.project_id, storage_key = %key, "Upload presigned");
    Ok(Json(DataResponse { data: upload }))
}

/// POST /api/files
///
/// Record metadata for an object the client uploaded with a presigned URL.
pub async fn register(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RegisterFileRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FileMetadata>>)> {
    input.validate()?;
    validate_storage_key(&input.storage_key)?;
    load_visible_project(&state.pool, &user, input.project_id).await?;

    let (uploaded_by_staff_id, uploaded_by_engineer_id) = uploader_columns(&user);
    let mut conn = state.pool.acquire().await?;
    let file = FileMetadataRepo::create(
        &mut conn,
        &CreateFileMetadata {
            project_id: input.project_id,
            storage_key: input.storage_key,
            original_name: input.original_name,
            content_type: input.content_type,
            size_bytes: input.size_bytes,
            uploaded_by_staff_id,
            uploaded_by_engineer_id,
        },
    )
    .await?;

    tracing::info!(file_id = file.id, project_id = file.project_id, "File registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: file })))
}

/// POST /api/files/upload
///
/// Multipart form with a `project_id` text field and a `file` part. The body
/// is written to storage by the server, then registered.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<FileMetadata>>)> {
    let mut project_id: Option<DbId> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "project_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::BadRequest(format!("Invalid project_id '{}'", text.trim()))
                })?;
                project_id = Some(id);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let project_id =
        project_id.ok_or_else(|| AppError::BadRequest("Missing 'project_id' field".into()))?;
    let (file_name, content_type, body) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' part".into()))?;
    if body.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    load_visible_project(&state.pool, &user, project_id).await?;

    let key = storage_key(Utc::now(), &file_name);
    let size_bytes = body.len() as i64;
    let (uploaded_by_staff_id, uploaded_by_engineer_id) = uploader_columns(&user);
    let metadata = store_upload(
        &state.pool,
        state.storage.as_ref(),
        &CreateFileMetadata {
            project_id,
            storage_key: key,
            original_name: file_name,
            content_type,
            size_bytes: Some(size_bytes),
            uploaded_by_staff_id,
            uploaded_by_engineer_id,
        },
        body,
    )
    .await?;

    tracing::info!(
        file_id = metadata.id,
        project_id,
        size_bytes,
        "File uploaded through server"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: metadata })))
}

/// Register `input` and write `body` to storage under its key.
///
/// The row is inserted first and committed only after the object is stored,
/// so an upload whose key is already taken fails with 409 before it can
/// overwrite the existing object.
pub async fn store_upload(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    input: &CreateFileMetadata,
    body: Vec<u8>,
) -> AppResult<FileMetadata> {
    let mut tx = pool.begin().await?;
    let metadata = FileMetadataRepo::create(&mut tx, input).await?;
    storage
        .put(&input.storage_key, &input.content_type, body)
        .await?;
    tx.commit().await?;
    Ok(metadata)
}

/// DELETE /api/files/{id}
///
/// Staff may delete any file of a project; engineers only the files they
/// uploaded themselves.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let file = FileMetadataRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("File", id))?;
    load_visible_project(&state.pool, &user, file.project_id).await?;

    if user.user_type == UserType::Engineer && file.uploaded_by_engineer_id != Some(user.user_id)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Engineers can only delete files they uploaded".into(),
        )));
    }

    state.storage.delete(&file.storage_key).await?;
    FileMetadataRepo::delete(&state.pool, id).await?;

    tracing::info!(file_id = id, storage_key = %file.storage_key, "File deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/files/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FileMetadata>>>> {
    load_visible_project(&state.pool, &user, project_id).await?;
    let files = FileMetadataRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: files }))
}
