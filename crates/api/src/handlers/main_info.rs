//! Handlers for `/vaxal/projects/{id}/main-info`.

use axum::extract::{Path, State};
use axum::Json;
use vaxal_core::types::DbId;
use vaxal_db::models::main_info::{MainInfo, UpdateMainInfo};
use vaxal_db::repositories::MainInfoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/vaxal/projects/{id}/main-info
pub async fn get(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MainInfo>>> {
    let info = MainInfoRepo::find_by_project(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    Ok(Json(DataResponse { data: info }))
}

/// PUT /api/vaxal/projects/{id}/main-info
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateMainInfo>,
) -> AppResult<Json<DataResponse<MainInfo>>> {
    let info = MainInfoRepo::update_by_project(&state.pool, project_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    Ok(Json(DataResponse { data: info }))
}
