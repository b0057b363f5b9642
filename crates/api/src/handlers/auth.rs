//! Handlers for the `/auth` resource (login, current user).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vaxal_core::error::CoreError;
use vaxal_core::roles::UserType;
use vaxal_core::types::DbId;
use vaxal_db::repositories::{EngineerRepo, StaffUserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Which account table to authenticate against.
    pub user_type: UserType,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info shared by login and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub user_type: UserType,
}

/// The columns login needs from either account table.
struct Account {
    info: UserInfo,
    password_hash: String,
    is_active: bool,
}

async fn find_account(
    state: &AppState,
    user_type: UserType,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    let account = match user_type {
        UserType::Vaxal => StaffUserRepo::find_by_email(&state.pool, email)
            .await?
            .map(|u| Account {
                info: UserInfo {
                    id: u.id,
                    email: u.email,
                    name: u.name,
                    role: u.role,
                    user_type,
                },
                password_hash: u.password_hash,
                is_active: u.is_active,
            }),
        UserType::Engineer => EngineerRepo::find_by_email(&state.pool, email)
            .await?
            .map(|e| Account {
                info: UserInfo {
                    id: e.id,
                    email: e.email,
                    name: e.name,
                    role: e.role,
                    user_type,
                },
                password_hash: e.password_hash,
                is_active: e.is_active,
            }),
    };
    Ok(account)
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// POST /api/auth/login
///
/// Authenticate a staff user or engineer with email + password and issue an
/// access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input.validate()?;

    let email = input.email.trim().to_lowercase();
    let account = find_account(&state, input.user_type, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(
            user_type = input.user_type.as_str(),
            user_id = account.info.id,
            "Login rejected: wrong password"
        );
        return Err(invalid_credentials());
    }

    let jwt = &state.config.jwt;
    let access_token =
        generate_access_token(account.info.id, &account.info.role, input.user_type, jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        user_type = input.user_type.as_str(),
        user_id = account.info.id,
        role = %account.info.role,
        "User logged in"
    );

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: jwt.access_token_expiry_mins * 60,
            user: account.info,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserInfo>>> {
    let not_found = || {
        AppError::Core(CoreError::Unauthorized(
            "Account no longer exists".into(),
        ))
    };

    let info = match user.user_type {
        UserType::Vaxal => {
            let u = StaffUserRepo::find_by_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(not_found)?;
            UserInfo {
                id: u.id,
                email: u.email,
                name: u.name,
                role: u.role,
                user_type: user.user_type,
            }
        }
        UserType::Engineer => {
            let e = EngineerRepo::find_by_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(not_found)?;
            UserInfo {
                id: e.id,
                email: e.email,
                name: e.name,
                role: e.role,
                user_type: user.user_type,
            }
        }
    };

    Ok(Json(DataResponse { data: info }))
}
