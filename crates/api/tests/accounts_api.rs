//! Integration tests for staff and engineer account administration.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use vaxal_core::roles::{ROLE_ENGINEER, ROLE_ENGINEER_MASTER, ROLE_VAXAL_ADMIN, ROLE_VAXAL_STAFF};

use common::{body_json, get, post_json, put_json};

/// Admins create engineers under an active master; the hash never leaks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_engineer(pool: PgPool) {
    let admin = common::create_staff(&pool, "admin@vaxal.test", ROLE_VAXAL_ADMIN).await;
    let master =
        common::create_engineer(&pool, "master@vaxal.test", ROLE_ENGINEER_MASTER, None).await;
    let app = common::build_test_app(pool);
    let token = common::staff_token(&app, &admin);

    let response = post_json(
        app.router(),
        "/api/vaxal/engineers",
        Some(&token),
        json!({
            "email": "New.Eng@Vaxal.test",
            "name": "New Engineer",
            "password": "install2026",
            "role": ROLE_ENGINEER,
            "master_id": master.id
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "new.eng@vaxal.test");
    assert_eq!(body["data"]["master_id"], master.id);
    assert!(body["data"].get("password_hash").is_none());

    let login = post_json(
        app.router(),
        "/api/auth/login",
        None,
        json!({ "email": "new.eng@vaxal.test", "password": "install2026", "user_type": "engineer" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

/// A plain engineer cannot be named as someone's master.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_master_must_be_engineer_master(pool: PgPool) {
    let admin = common::create_staff(&pool, "admin@vaxal.test", ROLE_VAXAL_ADMIN).await;
    let plain = common::create_engineer(&pool, "plain@vaxal.test", ROLE_ENGINEER, None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/vaxal/engineers",
        Some(&common::staff_token(&app, &admin)),
        json!({
            "email": "eng@vaxal.test",
            "name": "Engineer",
            "password": "install2026",
            "role": ROLE_ENGINEER,
            "master_id": plain.id
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Weak passwords, unknown roles and duplicate emails are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_staff_validation(pool: PgPool) {
    let admin = common::create_staff(&pool, "admin@vaxal.test", ROLE_VAXAL_ADMIN).await;
    let app = common::build_test_app(pool);
    let token = common::staff_token(&app, &admin);

    let weak = post_json(
        app.router(),
        "/api/vaxal/users",
        Some(&token),
        json!({ "email": "a@vaxal.test", "name": "A", "password": "short", "role": ROLE_VAXAL_STAFF }),
    )
    .await;
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);

    let bad_role = post_json(
        app.router(),
        "/api/vaxal/users",
        Some(&token),
        json!({ "email": "a@vaxal.test", "name": "A", "password": "office2026", "role": ROLE_ENGINEER }),
    )
    .await;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);

    let duplicate = post_json(
        app.router(),
        "/api/vaxal/users",
        Some(&token),
        json!({ "email": "admin@vaxal.test", "name": "Copy", "password": "office2026", "role": ROLE_VAXAL_STAFF }),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

/// Admins cannot deactivate themselves; non-admin staff cannot manage accounts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_admin_guards(pool: PgPool) {
    let admin = common::create_staff(&pool, "admin@vaxal.test", ROLE_VAXAL_ADMIN).await;
    let staff = common::create_staff(&pool, "staff@vaxal.test", ROLE_VAXAL_STAFF).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app.router(),
        &format!("/api/vaxal/users/{}", admin.id),
        Some(&common::staff_token(&app, &admin)),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let staff_token = common::staff_token(&app, &staff);
    let list = get(app.router(), "/api/vaxal/users", Some(&staff_token)).await;
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let engineers = get(app.router(), "/api/vaxal/engineers", Some(&staff_token)).await;
    assert_eq!(engineers.status(), StatusCode::OK);
}

/// Deactivated engineers are hidden unless `include_inactive` is set, and
/// can no longer log in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_engineer(pool: PgPool) {
    let admin = common::create_staff(&pool, "admin@vaxal.test", ROLE_VAXAL_ADMIN).await;
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let app = common::build_test_app(pool);
    let token = common::staff_token(&app, &admin);

    let response = put_json(
        app.router(),
        &format!("/api/vaxal/engineers/{}", engineer.id),
        Some(&token),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let active = body_json(get(app.router(), "/api/vaxal/engineers", Some(&token)).await).await;
    assert!(active["data"].as_array().unwrap().is_empty());

    let all = body_json(
        get(
            app.router(),
            "/api/vaxal/engineers?include_inactive=true",
            Some(&token),
        )
        .await,
    )
    .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);

    let login = post_json(
        app.router(),
        "/api/auth/login",
        None,
        json!({ "email": "eng@vaxal.test", "password": common::TEST_PASSWORD, "user_type": "engineer" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::FORBIDDEN);
}
