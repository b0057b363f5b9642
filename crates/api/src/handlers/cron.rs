//! Scheduler-facing endpoints under `/cron`.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use vaxal_core::error::CoreError;

use crate::background::overdue_sweep::{sweep_overdue_reports, SweepSummary};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Check `Authorization: Bearer <CRON_SECRET>`.
///
/// Without a configured secret the endpoint is open, except in production.
fn authorize_cron(headers: &HeaderMap, config: &ServerConfig) -> Result<(), CoreError> {
    let Some(secret) = config.cron_secret.as_deref() else {
        if config.is_production() {
            return Err(CoreError::Unauthorized("Cron secret is not configured".into()));
        }
        return Ok(());
    };

    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented != Some(secret) {
        return Err(CoreError::Unauthorized("Invalid cron secret".into()));
    }
    Ok(())
}

/// GET /api/cron/overdue-reports
pub async fn overdue_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<SweepSummary>>> {
    authorize_cron(&headers, &state.config).map_err(AppError::Core)?;
    let summary = sweep_overdue_reports(&state.pool, Utc::now()).await?;
    Ok(Json(DataResponse { data: summary }))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::jwt::JwtConfig;
    use crate::config::StorageConfig;

    fn config(app_env: &str, cron_secret: Option<&str>) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 1,
            app_env: app_env.into(),
            cron_secret: cron_secret.map(String::from),
            overdue_sweep_interval_secs: None,
            storage: StorageConfig {
                bucket: None,
                presign_expiry_secs: 60,
                max_upload_bytes: 1024,
            },
            jwt: JwtConfig {
                secret: "cron-test-secret".into(),
                access_token_expiry_mins: 5,
            },
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn matching_secret_is_accepted() {
        let cfg = config("production", Some("s3cret"));
        assert!(authorize_cron(&bearer("s3cret"), &cfg).is_ok());
    }

    #[test]
    fn wrong_or_missing_secret_is_rejected() {
        let cfg = config("development", Some("s3cret"));
        assert!(authorize_cron(&bearer("nope"), &cfg).is_err());
        assert!(authorize_cron(&HeaderMap::new(), &cfg).is_err());
    }

    #[test]
    fn unset_secret_is_open_outside_production_only() {
        assert!(authorize_cron(&HeaderMap::new(), &config("development", None)).is_ok());
        assert!(authorize_cron(&HeaderMap::new(), &config("production", None)).is_err());
    }
}
