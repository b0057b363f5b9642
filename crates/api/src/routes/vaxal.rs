//! Staff routes mounted at `/vaxal`. Every handler extracts one of the staff
//! RBAC guards, so engineer tokens are rejected with 403.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{inventory, main_info, notification, project, user, workflow};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Projects
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/projects/{id}/main-info",
            get(main_info::get).put(main_info::update),
        )
        .route("/projects/{id}/assign", put(workflow::assign))
        .route("/projects/{id}/complete", put(workflow::complete))
        .route("/projects/{id}/reports", get(workflow::list_reports))
        // Accounts
        .route(
            "/engineers",
            get(user::list_engineers).post(user::create_engineer),
        )
        .route("/engineers/{id}", put(user::update_engineer))
        .route("/engineers/{id}/calendar", get(user::engineer_calendar))
        .route("/users", get(user::list_staff).post(user::create_staff))
        .route("/users/{id}", put(user::update_staff))
        // Inventory
        .route("/inventory", get(inventory::list).post(inventory::create))
        .route(
            "/inventory/{id}",
            put(inventory::update).delete(inventory::delete),
        )
        .route("/inventory/{id}/move", post(inventory::move_item))
        .route(
            "/inventory/{id}/price-history",
            get(inventory::price_history),
        )
        // Notifications
        .route("/notifications", get(notification::staff_list))
        .route(
            "/notifications/unread-count",
            get(notification::staff_unread_count),
        )
        .route(
            "/notifications/read-all",
            post(notification::staff_mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            post(notification::staff_mark_read),
        )
}
