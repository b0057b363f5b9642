//! Handlers for the `/notifications` resource.
//!
//! Staff and engineers each get the same four endpoints under their own
//! prefix. The thin per-prefix handlers pick the extractor; the shared
//! functions below do the work for a [`Recipient`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vaxal_core::notification::Recipient;
use vaxal_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vaxal_core::types::DbId;
use vaxal_db::models::notification::Notification;
use vaxal_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireEngineer, RequireStaff};
use crate::query::NotificationListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

async fn list_for(
    state: &AppState,
    recipient: Recipient,
    params: NotificationListParams,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let notifications = NotificationRepo::list_for_recipient(
        &state.pool,
        recipient,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

async fn unread_count_for(
    state: &AppState,
    recipient: Recipient,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, recipient).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// 204 on success; 404 when the notification is not the caller's or was
/// already read.
async fn mark_read_for(
    state: &AppState,
    recipient: Recipient,
    notification_id: DbId,
) -> AppResult<StatusCode> {
    if NotificationRepo::mark_read(&state.pool, notification_id, recipient).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Notification", notification_id))
    }
}

async fn mark_all_read_for(
    state: &AppState,
    recipient: Recipient,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, recipient).await?;
    Ok(Json(DataResponse {
        data: MarkedRead { marked_read },
    }))
}

// ---------------------------------------------------------------------------
// /api/vaxal/notifications
// ---------------------------------------------------------------------------

pub async fn staff_list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    list_for(&state, user.recipient(), params).await
}

pub async fn staff_unread_count(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    unread_count_for(&state, user.recipient()).await
}

pub async fn staff_mark_read(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    mark_read_for(&state, user.recipient(), id).await
}

pub async fn staff_mark_all_read(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    mark_all_read_for(&state, user.recipient()).await
}

// ---------------------------------------------------------------------------
// /api/engineer/notifications
// ---------------------------------------------------------------------------

pub async fn engineer_list(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    list_for(&state, user.recipient(), params).await
}

pub async fn engineer_unread_count(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    unread_count_for(&state, user.recipient()).await
}

pub async fn engineer_mark_read(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    mark_read_for(&state, user.recipient(), id).await
}

pub async fn engineer_mark_all_read(
    State(state): State<AppState>,
    RequireEngineer(user): RequireEngineer,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    mark_all_read_for(&state, user.recipient()).await
}
