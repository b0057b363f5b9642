//! Engineer routes mounted at `/engineer`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{calendar, engineer_project, notification};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(engineer_project::list))
        .route("/projects/{id}", get(engineer_project::get_by_id))
        .route(
            "/projects/{id}/report",
            post(engineer_project::submit_report),
        )
        .route("/calendar", get(calendar::list).post(calendar::create))
        .route(
            "/calendar/{id}",
            put(calendar::update).delete(calendar::delete),
        )
        .route("/notifications", get(notification::engineer_list))
        .route(
            "/notifications/unread-count",
            get(notification::engineer_unread_count),
        )
        .route(
            "/notifications/read-all",
            post(notification::engineer_mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            post(notification::engineer_mark_read),
        )
}
