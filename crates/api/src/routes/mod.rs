pub mod auth;
pub mod cron;
pub mod engineer;
pub mod files;
pub mod health;
pub mod vaxal;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/me                                      current user
///
/// /vaxal/projects                               list, create (staff)
/// /vaxal/projects/{id}                          get, update, delete (delete: manager)
/// /vaxal/projects/{id}/main-info                get, update
/// /vaxal/projects/{id}/assign                   assign (manager, PUT)
/// /vaxal/projects/{id}/complete                 complete (manager, PUT)
/// /vaxal/projects/{id}/reports                  field reports
/// /vaxal/engineers                              list, create (create: admin)
/// /vaxal/engineers/{id}                         update (admin)
/// /vaxal/engineers/{id}/calendar                engineer calendar
/// /vaxal/users                                  list, create (admin)
/// /vaxal/users/{id}                             update (admin)
/// /vaxal/inventory                              list, create (create: manager)
/// /vaxal/inventory/{id}                         update, delete (manager)
/// /vaxal/inventory/{id}/move                    swap display order (manager, POST)
/// /vaxal/inventory/{id}/price-history           price history
/// /vaxal/notifications[...]                     own notifications
///
/// /engineer/projects                            visible projects
/// /engineer/projects/{id}                       project detail
/// /engineer/projects/{id}/report                submit report (POST)
/// /engineer/calendar                            list, create
/// /engineer/calendar/{id}                       update, delete (AVAILABLE only)
/// /engineer/notifications[...]                  own notifications
///
/// /files/presign                                presigned upload URL
/// /files                                        register uploaded file
/// /files/upload                                 multipart upload
/// /files/{id}                                   delete
/// /files/project/{project_id}                   list project files
///
/// /cron/overdue-reports                         overdue sweep (bearer secret)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/vaxal", vaxal::router())
        .nest("/engineer", engineer::router())
        .nest("/files", files::router(config.storage.max_upload_bytes))
        .nest("/cron", cron::router())
}
