//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement with 403. A missing or invalid token is still 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vaxal_core::error::CoreError;
use vaxal_core::roles::{is_manager_role, UserType, ROLE_VAXAL_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Any Vaxal staff member (`VAXAL_ADMIN`, `VAXAL_STAFF`, `CALL_CENTER`).
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.user_type != UserType::Vaxal {
            return Err(forbidden("Vaxal staff access required"));
        }
        Ok(RequireStaff(user))
    }
}

/// Staff allowed to run the project workflow and manage inventory
/// (`VAXAL_ADMIN` or `VAXAL_STAFF`).
///
/// ```ignore
/// async fn assign(RequireManager(user): RequireManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireStaff(user) = RequireStaff::from_request_parts(parts, state).await?;
        if !is_manager_role(&user.role) {
            return Err(forbidden("VAXAL_ADMIN or VAXAL_STAFF role required"));
        }
        Ok(RequireManager(user))
    }
}

/// `VAXAL_ADMIN` only (account administration).
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireStaff(user) = RequireStaff::from_request_parts(parts, state).await?;
        if user.role != ROLE_VAXAL_ADMIN {
            return Err(forbidden("Admin role required"));
        }
        Ok(RequireAdmin(user))
    }
}

/// Any engineer (`ENGINEER_MASTER` or `ENGINEER`).
pub struct RequireEngineer(pub AuthUser);

impl FromRequestParts<AppState> for RequireEngineer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.user_type != UserType::Engineer {
            return Err(forbidden("Engineer access required"));
        }
        Ok(RequireEngineer(user))
    }
}

fn forbidden(message: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(message.into()))
}
