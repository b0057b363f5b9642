use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::file;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// POST   /presign                -> presign
/// POST   /                       -> register
/// POST   /upload                 -> upload (multipart, body limit applies)
/// DELETE /{id}                   -> delete
/// GET    /project/{project_id}   -> list_by_project
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/presign", post(file::presign))
        .route("/", post(file::register))
        .route(
            "/upload",
            post(file::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{id}", delete(file::delete))
        .route("/project/{project_id}", get(file::list_by_project))
}
