//! Account administration: staff users and engineers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vaxal_core::error::CoreError;
use vaxal_core::roles::{ENGINEER_ROLES, ROLE_ENGINEER_MASTER, STAFF_ROLES};
use vaxal_core::types::DbId;
use vaxal_db::models::calendar_event::CalendarEvent;
use vaxal_db::models::user::{
    CreateEngineer, CreateStaffUser, EngineerResponse, StaffUserResponse, UpdateEngineer,
    UpdateStaffUser,
};
use vaxal_db::repositories::{CalendarEventRepo, EngineerRepo, StaffUserRepo};
use vaxal_db::DbPool;

use crate::auth::password::{check_password_policy, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::{CalendarRangeParams, IncludeInactiveParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEngineerRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub password: String,
    pub role: String,
    pub master_id: Option<DbId>,
}

fn ensure_role(role: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

fn hash_new_password(password: &str) -> AppResult<String> {
    check_password_policy(password).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hash error: {e}")))
}

/// `master_id` must point at an active `ENGINEER_MASTER` other than the
/// engineer itself.
async fn ensure_master(
    pool: &DbPool,
    master_id: DbId,
    engineer_id: Option<DbId>,
) -> AppResult<()> {
    if engineer_id == Some(master_id) {
        return Err(AppError::Core(CoreError::Validation(
            "An engineer cannot supervise themselves".into(),
        )));
    }
    let master = EngineerRepo::find_by_id(pool, master_id)
        .await?
        .ok_or_else(|| AppError::not_found("Engineer", master_id))?;
    if master.role != ROLE_ENGINEER_MASTER || !master.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Engineer {master_id} is not an active {ROLE_ENGINEER_MASTER}"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Staff users
// ---------------------------------------------------------------------------

/// GET /api/vaxal/users
pub async fn list_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<StaffUserResponse>>>> {
    let users = StaffUserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(StaffUserResponse::from).collect(),
    }))
}

/// POST /api/vaxal/users
pub async fn create_staff(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateStaffUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StaffUserResponse>>)> {
    input.validate()?;
    ensure_role(&input.role, STAFF_ROLES)?;
    let password_hash = hash_new_password(&input.password)?;

    let user = StaffUserRepo::create(
        &state.pool,
        &CreateStaffUser {
            email: input.email.trim().to_lowercase(),
            name: input.name.trim().to_string(),
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        created_by = admin.user_id,
        role = %user.role,
        "Staff user created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// PUT /api/vaxal/users/{id}
pub async fn update_staff(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaffUser>,
) -> AppResult<Json<DataResponse<StaffUserResponse>>> {
    if let Some(role) = input.role.as_deref() {
        ensure_role(role, STAFF_ROLES)?;
    }
    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let user = StaffUserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("StaffUser", id))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Engineers
// ---------------------------------------------------------------------------

/// GET /api/vaxal/engineers
pub async fn list_engineers(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<EngineerResponse>>>> {
    let engineers = EngineerRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse {
        data: engineers.into_iter().map(EngineerResponse::from).collect(),
    }))
}

/// POST /api/vaxal/engineers
pub async fn create_engineer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateEngineerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<EngineerResponse>>)> {
    input.validate()?;
    ensure_role(&input.role, ENGINEER_ROLES)?;
    if let Some(master_id) = input.master_id {
        ensure_master(&state.pool, master_id, None).await?;
    }
    let password_hash = hash_new_password(&input.password)?;

    let engineer = EngineerRepo::create(
        &state.pool,
        &CreateEngineer {
            email: input.email.trim().to_lowercase(),
            name: input.name.trim().to_string(),
            phone: input.phone,
            password_hash,
            role: input.role,
            master_id: input.master_id,
        },
    )
    .await?;

    tracing::info!(
        engineer_id = engineer.id,
        created_by = admin.user_id,
        role = %engineer.role,
        "Engineer created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: engineer.into() })))
}

/// PUT /api/vaxal/engineers/{id}
pub async fn update_engineer(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEngineer>,
) -> AppResult<Json<DataResponse<EngineerResponse>>> {
    if let Some(role) = input.role.as_deref() {
        ensure_role(role, ENGINEER_ROLES)?;
    }
    if let Some(master_id) = input.master_id {
        ensure_master(&state.pool, master_id, Some(id)).await?;
    }

    let engineer = EngineerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Engineer", id))?;
    Ok(Json(DataResponse { data: engineer.into() }))
}

/// GET /api/vaxal/engineers/{id}/calendar?from=&to=
pub async fn engineer_calendar(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Query(range): Query<CalendarRangeParams>,
) -> AppResult<Json<DataResponse<Vec<CalendarEvent>>>> {
    if range.to <= range.from {
        return Err(AppError::BadRequest("`to` must be later than `from`".into()));
    }
    EngineerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Engineer", id))?;

    let events =
        CalendarEventRepo::list_for_engineer(&state.pool, id, range.from, range.to).await?;
    Ok(Json(DataResponse { data: events }))
}
