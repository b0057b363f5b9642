//! Row-level visibility for engineers.
//!
//! An `ENGINEER` sees projects assigned to them. An `ENGINEER_MASTER` also
//! sees the projects of engineers they supervise. Staff see everything.

use vaxal_core::project_status::STATUS_PENDING;
use vaxal_core::roles::{UserType, ROLE_ENGINEER_MASTER};
use vaxal_core::types::DbId;
use vaxal_db::models::project::Project;
use vaxal_db::repositories::{EngineerRepo, ProjectRepo};
use vaxal_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Engineer ids whose projects `user` may see.
pub async fn engineer_scope(pool: &DbPool, user: &AuthUser) -> AppResult<Vec<DbId>> {
    let mut ids = vec![user.user_id];
    if user.role == ROLE_ENGINEER_MASTER {
        ids.extend(EngineerRepo::list_supervised_ids(pool, user.user_id).await?);
    }
    Ok(ids)
}

/// Load a project and check that `user` may see it.
///
/// Projects outside an engineer's scope, and still-pending projects, are
/// reported as not found so their existence is not leaked.
pub async fn load_visible_project(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;

    if user.user_type == UserType::Vaxal {
        return Ok(project);
    }

    let visible = match project.engineer_id {
        Some(engineer_id) if project.status != STATUS_PENDING => {
            engineer_scope(pool, user).await?.contains(&engineer_id)
        }
        _ => false,
    };
    if !visible {
        return Err(AppError::not_found("Project", project_id));
    }
    Ok(project)
}
