//! Engineer calendar (`/engineer/calendar`).
//!
//! Engineers manage their own `AVAILABLE` blocks. `CONFIRMED` bookings come
//! from project assignment and are read-only here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vaxal_core::calendar::{ensure_engineer_editable, validate_range};
use vaxal_core::types::DbId;
use vaxal_db::models::calendar_event::{CalendarEvent, CreateCalendarEvent, UpdateCalendarEvent};
use vaxal_db::repositories::CalendarEventRepo;
use vaxal_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEngineer;
use crate::query::CalendarRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load one of the caller's events, rejecting confirmed bookings.
async fn load_editable(pool: &DbPool, user: &AuthUser, id: DbId) -> AppResult<CalendarEvent> {
    let event = CalendarEventRepo::find_by_id(pool, id)
        .await?
        .filter(|e| e.engineer_id == user.user_id)
        .ok_or_else(|| AppError::not_found("CalendarEvent", id))?;
    ensure_engineer_editable(&event.status)?;
    Ok(event)
}

/// GET /api/engineer/calendar?from=&to=
pub async fn list(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Query(range): Query<CalendarRangeParams>,
) -> AppResult<Json<DataResponse<Vec<CalendarEvent>>>> {
    if range.to <= range.from {
        return Err(AppError::BadRequest("`to` must be later than `from`".into()));
    }
    let events =
        CalendarEventRepo::list_for_engineer(&state.pool, user.user_id, range.from, range.to)
            .await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/engineer/calendar
pub async fn create(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Json(input): Json<CreateCalendarEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<CalendarEvent>>)> {
    validate_range(input.start_at, input.end_at)?;
    let event = CalendarEventRepo::create_available(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/engineer/calendar/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCalendarEvent>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    let current = load_editable(&state.pool, &user, id).await?;
    validate_range(
        input.start_at.unwrap_or(current.start_at),
        input.end_at.unwrap_or(current.end_at),
    )?;

    let event = CalendarEventRepo::update_available(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("CalendarEvent", id))?;
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/engineer/calendar/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_editable(&state.pool, &user, id).await?;
    if CalendarEventRepo::delete_available(&state.pool, id, user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("CalendarEvent", id))
    }
}
