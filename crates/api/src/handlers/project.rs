//! Handlers for the staff `/vaxal/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vaxal_core::error::CoreError;
use vaxal_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vaxal_core::project_status::{ProjectStatus, STATUS_PENDING};
use vaxal_core::types::DbId;
use vaxal_db::models::main_info::MainInfo;
use vaxal_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use vaxal_db::repositories::{MainInfoRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManager, RequireStaff};
use crate::query::ProjectListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// A project together with its main-info record.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub main_info: Option<MainInfo>,
}

/// GET /api/vaxal/projects
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<PaginatedResponse<Project>>> {
    if let Some(status) = params.status.as_deref() {
        ProjectStatus::from_str_value(status)?;
    }

    let filter = ProjectFilter {
        status: params.status,
        engineer_id: params.engineer_id,
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let projects = ProjectRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = ProjectRepo::count(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse {
        data: projects,
        total,
        limit,
        offset,
    }))
}

/// POST /api/vaxal/projects
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.project_number = input.project_number.trim().to_string();
    if input.project_number.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "project_number must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(
        project_id = project.id,
        project_number = %project.project_number,
        created_by = user.user_id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/vaxal/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    let main_info = MainInfoRepo::find_by_project(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ProjectDetail { project, main_info },
    }))
}

/// PUT /api/vaxal/projects/{id}
///
/// The engineer and work date can only be changed while the project is still
/// pending; afterwards they are tied to the confirmed calendar booking.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let mut tx = state.pool.begin().await?;
    let current = ProjectRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;

    if current.status != STATUS_PENDING {
        // Resending the stored value is not a change.
        if input.engineer_id.is_some() && input.engineer_id == current.engineer_id {
            input.engineer_id = None;
        }
        if input.work_date.is_some() && input.work_date == current.work_date {
            input.work_date = None;
        }
        if input.engineer_id.is_some() || input.work_date.is_some() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "The engineer and work date of a {} project cannot be changed",
                current.status
            ))));
        }
    }

    let project = ProjectRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    tx.commit().await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/vaxal/projects/{id}
///
/// Only pending projects can be deleted.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    if project.status != STATUS_PENDING {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Only PENDING projects can be deleted (status is {})",
            project.status
        ))));
    }

    if !ProjectRepo::delete_pending(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Project changed status while being deleted".into(),
        )));
    }
    tracing::info!(project_id = id, deleted_by = user.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
