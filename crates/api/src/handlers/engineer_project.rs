//! Engineer-facing project views and field report submission.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use vaxal_core::error::CoreError;
use vaxal_core::notification::{NotificationType, Recipient};
use vaxal_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vaxal_core::project_status::ProjectStatus;
use vaxal_core::types::DbId;
use vaxal_db::models::main_info::MainInfo;
use vaxal_db::models::project::Project;
use vaxal_db::models::project_report::{CreateProjectReport, ProjectReport};
use vaxal_db::repositories::{MainInfoRepo, ProjectReportRepo, ProjectRepo};

use crate::access::{engineer_scope, load_visible_project};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEngineer;
use crate::notifications::dispatch;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EngineerProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub main_info: Option<MainInfo>,
    pub reports: Vec<ProjectReport>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: ProjectReport,
    pub project: Project,
}

/// GET /api/engineer/projects
///
/// Projects assigned to the caller, plus those of supervised engineers for an
/// `ENGINEER_MASTER`. Pending projects are never listed.
pub async fn list(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Project>>> {
    let scope = engineer_scope(&state.pool, &user).await?;
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let projects = ProjectRepo::list_for_engineers(&state.pool, &scope, limit, offset).await?;
    let total = ProjectRepo::count_for_engineers(&state.pool, &scope).await?;

    Ok(Json(PaginatedResponse {
        data: projects,
        total,
        limit,
        offset,
    }))
}

/// GET /api/engineer/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EngineerProjectDetail>>> {
    let project = load_visible_project(&state.pool, &user, id).await?;
    let main_info = MainInfoRepo::find_by_project(&state.pool, id).await?;
    let reports = ProjectReportRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: EngineerProjectDetail {
            project,
            main_info,
            reports,
        },
    }))
}

/// POST /api/engineer/projects/{id}/report
///
/// Appends a field report and moves the project to `REPORTED`, or to
/// `REMAINING_WORK` when `has_remaining_work` is set. The staff member who
/// created the project is notified.
pub async fn submit_report(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProjectReport>,
) -> AppResult<(StatusCode, Json<DataResponse<ReportResponse>>)> {
    if input.work_summary.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "work_summary must not be empty".into(),
        )));
    }
    load_visible_project(&state.pool, &user, id).await?;

    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;

    let current = ProjectStatus::from_str_value(&project.status)?;
    if !current.accepts_report() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Reports cannot be submitted for a {} project",
            current.as_str()
        ))));
    }
    let next = if input.has_remaining_work {
        ProjectStatus::RemainingWork
    } else {
        ProjectStatus::Reported
    };
    current.ensure_transition(next)?;

    let report = ProjectReportRepo::create(&mut tx, id, user.user_id, &input).await?;
    let updated =
        ProjectRepo::mark_reported(&mut tx, id, current.as_str(), next.as_str(), Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "Project status changed while reporting".into(),
                ))
            })?;

    if let Some(staff_id) = updated.created_by {
        dispatch(
            &mut tx,
            Recipient::Staff(staff_id),
            NotificationType::ProjectReported,
            &updated,
            None,
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        project_id = id,
        engineer_id = user.user_id,
        status = next.as_str(),
        "Field report submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ReportResponse {
                report,
                project: updated,
            },
        }),
    ))
}
