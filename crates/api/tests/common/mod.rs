#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vaxal_api::auth::jwt::{generate_access_token, JwtConfig};
use vaxal_api::auth::password::hash_password;
use vaxal_api::config::{ServerConfig, StorageConfig};
use vaxal_api::router::build_app_router;
use vaxal_api::state::AppState;
use vaxal_api::storage::memory::MemoryStorage;
use vaxal_core::roles::UserType;
use vaxal_core::types::DbId;
use vaxal_db::models::main_info::UpdateMainInfo;
use vaxal_db::models::project::{CreateProject, Project};
use vaxal_db::models::user::{CreateEngineer, CreateStaffUser, Engineer, StaffUser};
use vaxal_db::repositories::{EngineerRepo, MainInfoRepo, ProjectRepo, StaffUserRepo};

pub const TEST_PASSWORD: &str = "fieldwork42";
pub const CRON_SECRET: &str = "test-cron-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        app_env: "test".to_string(),
        cron_secret: Some(CRON_SECRET.to_string()),
        overdue_sweep_interval_secs: None,
        storage: StorageConfig {
            bucket: None,
            presign_expiry_secs: 300,
            max_upload_bytes: 1024 * 1024,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Test application plus the in-memory object store behind it.
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<MemoryStorage>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, test_config())
}

/// Same middleware stack as the binary, backed by [`MemoryStorage`].
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> TestApp {
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: storage.clone(),
    };
    TestApp {
        router: build_app_router(state, &config),
        storage,
        config,
    }
}

// ---------------------------------------------------------------------------
// Accounts and tokens
// ---------------------------------------------------------------------------

pub async fn create_staff(pool: &PgPool, email: &str, role: &str) -> StaffUser {
    StaffUserRepo::create(
        pool,
        &CreateStaffUser {
            email: email.to_string(),
            name: format!("Staff {email}"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
        },
    )
    .await
    .expect("staff creation should succeed")
}

pub async fn create_engineer(
    pool: &PgPool,
    email: &str,
    role: &str,
    master_id: Option<DbId>,
) -> Engineer {
    EngineerRepo::create(
        pool,
        &CreateEngineer {
            email: email.to_string(),
            name: format!("Engineer {email}"),
            phone: Some("090-1111-2222".to_string()),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
            master_id,
        },
    )
    .await
    .expect("engineer creation should succeed")
}

pub fn staff_token(app: &TestApp, user: &StaffUser) -> String {
    generate_access_token(user.id, &user.role, UserType::Vaxal, &app.config.jwt)
        .expect("token generation should succeed")
}

pub fn engineer_token(app: &TestApp, engineer: &Engineer) -> String {
    generate_access_token(engineer.id, &engineer.role, UserType::Engineer, &app.config.jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// A pending project with every checklist field filled in.
pub async fn create_ready_project(
    pool: &PgPool,
    number: &str,
    engineer_id: DbId,
    created_by: Option<DbId>,
) -> Project {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            project_number: number.to_string(),
            customer_name: Some("Sato Hanako".to_string()),
            customer_phone: Some("03-1234-5678".to_string()),
            site_address: Some("1-2-3 Shibuya, Tokyo".to_string()),
            work_category: Some("air_conditioner".to_string()),
            engineer_id: Some(engineer_id),
            work_date: Some(Utc.with_ymd_and_hms(2026, 10, 20, 1, 0, 0).unwrap()),
            ..Default::default()
        },
        created_by,
    )
    .await
    .expect("project creation should succeed");

    let day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    MainInfoRepo::update_by_project(
        pool,
        project.id,
        &UpdateMainInfo {
            contractor_name: Some("Kanto Setsubi".to_string()),
            contractor_contact: Some("03-0000-0000".to_string()),
            sales_staff: Some("Tanaka".to_string()),
            survey_staff: Some("Suzuki".to_string()),
            survey_date: Some(day),
            delivery_method: Some("direct".to_string()),
            delivery_date: Some(day),
            construction_content: Some("Replace indoor unit".to_string()),
            construction_date: Some(day),
            ..Default::default()
        },
    )
    .await
    .expect("main-info update should succeed")
    .expect("main-info row should exist");

    project
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn with_auth(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    let request = with_auth(Request::get(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    let request = with_auth(Request::delete(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let request = with_auth(Request::builder().method(method).uri(uri), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    json_request(app, "POST", uri, token, body).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    json_request(app, "PUT", uri, token, body).await
}

/// Send a raw request (multipart uploads, custom headers).
pub async fn send_raw(app: Router, request: Request<Body>) -> Response {
    send(app, request).await
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
