//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vaxal_core::error::CoreError;
use vaxal_core::notification::Recipient;
use vaxal_core::roles::UserType;
use vaxal_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id in `staff_users` or `engineers`, depending on `user_type`.
    pub user_id: DbId,
    pub role: String,
    pub user_type: UserType,
}

impl AuthUser {
    /// This user as a notification recipient.
    pub fn recipient(&self) -> Recipient {
        match self.user_type {
            UserType::Vaxal => Recipient::Staff(self.user_id),
            UserType::Engineer => Recipient::Engineer(self.user_id),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // A staff role inside an engineer token (or the reverse) is never issued.
        if !claims.user_type.accepts_role(&claims.role) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token role does not match user type".into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            user_type: claims.user_type,
        })
    }
}
