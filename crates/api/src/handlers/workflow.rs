//! Staff side of the project lifecycle: assignment, completion and the
//! report log.
//!
//! Each transition runs in one transaction: the project row is locked, the
//! status change is a conditional update, and the notification (plus the
//! calendar booking on assignment) is inserted before commit.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vaxal_core::assignment::AssignmentCandidate;
use vaxal_core::error::CoreError;
use vaxal_core::jst::day_bounds_utc;
use vaxal_core::notification::{NotificationType, Recipient};
use vaxal_core::project_status::ProjectStatus;
use vaxal_core::types::DbId;
use vaxal_db::models::calendar_event::CalendarEvent;
use vaxal_db::models::project::Project;
use vaxal_db::models::project_report::ProjectReport;
use vaxal_db::repositories::{
    CalendarEventRepo, EngineerRepo, MainInfoRepo, ProjectReportRepo, ProjectRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManager, RequireStaff};
use crate::notifications::dispatch;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AssignRequest {
    /// Replaces the stored engineer when present.
    pub engineer_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct AssignResponse {
    pub project: Project,
    pub calendar_event: CalendarEvent,
}

/// PUT /api/vaxal/projects/{id}/assign
///
/// Moves a `PENDING` project to `ASSIGNED` once every checklist field is
/// filled in. A failed checklist answers 400 `MISSING_FIELDS` listing every
/// missing field; nothing is written.
pub async fn assign(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<DataResponse<AssignResponse>>> {
    let mut tx = state.pool.begin().await?;

    let project = ProjectRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    ProjectStatus::from_str_value(&project.status)?.ensure_transition(ProjectStatus::Assigned)?;

    // The stored engineer may have been deactivated since it was set.
    let engineer_id = input.engineer_id.or(project.engineer_id);
    if let Some(engineer_id) = engineer_id {
        let engineer = EngineerRepo::find_by_id(&state.pool, engineer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Engineer", engineer_id))?;
        if !engineer.is_active {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Engineer {engineer_id} is deactivated"
            ))));
        }
    }
    if let Some(new_engineer_id) = input.engineer_id {
        ProjectRepo::set_engineer(&mut tx, id, new_engineer_id).await?;
    }

    let main_info = MainInfoRepo::find_by_project(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Project {id} has no main-info row")))?;

    let candidate = AssignmentCandidate {
        customer_name: project.customer_name.as_deref(),
        customer_phone: project.customer_phone.as_deref(),
        site_address: project.site_address.as_deref(),
        work_category: project.work_category.as_deref(),
        work_date: project.work_date,
        engineer_id,
        contractor_name: main_info.contractor_name.as_deref(),
        contractor_contact: main_info.contractor_contact.as_deref(),
        sales_staff: main_info.sales_staff.as_deref(),
        survey_staff: main_info.survey_staff.as_deref(),
        survey_date: main_info.survey_date,
        delivery_method: main_info.delivery_method.as_deref(),
        delivery_date: main_info.delivery_date,
        construction_content: main_info.construction_content.as_deref(),
        construction_date: main_info.construction_date,
    };
    if let Err(err) = candidate.check() {
        tracing::debug!(project_id = id, error = %err, "Assignment checklist failed");
        return Err(err.into());
    }

    let assigned = ProjectRepo::mark_assigned(&mut tx, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Project is no longer pending".into(),
            ))
        })?;

    let (Some(engineer_id), Some(work_date)) = (assigned.engineer_id, assigned.work_date) else {
        return Err(AppError::InternalError(format!(
            "Assigned project {id} lost its engineer or work date"
        )));
    };

    dispatch(
        &mut tx,
        Recipient::Engineer(engineer_id),
        NotificationType::ProjectAssigned,
        &assigned,
        None,
    )
    .await?;

    let (start_at, end_at) = day_bounds_utc(work_date);
    let calendar_event = CalendarEventRepo::create_confirmed(
        &mut tx,
        engineer_id,
        id,
        &assigned.project_number,
        start_at,
        end_at,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        project_id = id,
        engineer_id,
        assigned_by = user.user_id,
        "Project assigned"
    );

    Ok(Json(DataResponse {
        data: AssignResponse {
            project: assigned,
            calendar_event,
        },
    }))
}

/// PUT /api/vaxal/projects/{id}/complete
///
/// `REPORTED -> COMPLETED`. Requires an assigned engineer and no previous
/// completion date.
pub async fn complete(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let mut tx = state.pool.begin().await?;

    let project = ProjectRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    ProjectStatus::from_str_value(&project.status)?.ensure_transition(ProjectStatus::Completed)?;

    let Some(engineer_id) = project.engineer_id else {
        return Err(AppError::Core(CoreError::Validation(
            "Project has no assigned engineer".into(),
        )));
    };
    if project.completed_at.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Project already has a completion date".into(),
        )));
    }

    let completed = ProjectRepo::mark_completed(&mut tx, id, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Project can no longer be completed".into(),
            ))
        })?;

    dispatch(
        &mut tx,
        Recipient::Engineer(engineer_id),
        NotificationType::ProjectCompleted,
        &completed,
        None,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(project_id = id, completed_by = user.user_id, "Project completed");
    Ok(Json(DataResponse { data: completed }))
}

/// GET /api/vaxal/projects/{id}/reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectReport>>>> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    let reports = ProjectReportRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: reports }))
}
