//! Integration tests for the notification inboxes.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use vaxal_core::roles::{ROLE_ENGINEER, ROLE_VAXAL_STAFF};

use common::{body_json, get, post_json, put_json};

/// Assignment lands in the engineer inbox; read markers update the count.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_engineer_inbox_read_flow(pool: PgPool) {
    let staff = common::create_staff(&pool, "staff@vaxal.test", ROLE_VAXAL_STAFF).await;
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let first = common::create_ready_project(&pool, "VX-5000", engineer.id, None).await;
    let second = common::create_ready_project(&pool, "VX-5001", engineer.id, None).await;
    let app = common::build_test_app(pool);
    let staff_token = common::staff_token(&app, &staff);
    for project in [&first, &second] {
        put_json(
            app.router(),
            &format!("/api/vaxal/projects/{}/assign", project.id),
            Some(&staff_token),
            json!({}),
        )
        .await;
    }

    let token = common::engineer_token(&app, &engineer);
    let count = body_json(
        get(app.router(), "/api/engineer/notifications/unread-count", Some(&token)).await,
    )
    .await;
    assert_eq!(count["data"]["count"], 2);

    let inbox = body_json(get(app.router(), "/api/engineer/notifications", Some(&token)).await).await;
    let notifications = inbox["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| n["notification_type"] == "PROJECT_ASSIGNED"));
    let id = notifications[0]["id"].as_i64().unwrap();

    let read = post_json(
        app.router(),
        &format!("/api/engineer/notifications/{id}/read"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(read.status(), StatusCode::NO_CONTENT);

    let again = post_json(
        app.router(),
        &format!("/api/engineer/notifications/{id}/read"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let unread_only = body_json(
        get(
            app.router(),
            "/api/engineer/notifications?unread_only=true",
            Some(&token),
        )
        .await,
    )
    .await;
    assert_eq!(unread_only["data"].as_array().unwrap().len(), 1);

    let all = body_json(
        post_json(
            app.router(),
            "/api/engineer/notifications/read-all",
            Some(&token),
            json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(all["data"]["marked_read"], 1);
}

/// A recipient cannot mark someone else's notification as read.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_read_foreign_notification(pool: PgPool) {
    let staff = common::create_staff(&pool, "staff@vaxal.test", ROLE_VAXAL_STAFF).await;
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let other = common::create_engineer(&pool, "other@vaxal.test", ROLE_ENGINEER, None).await;
    let project = common::create_ready_project(&pool, "VX-5100", engineer.id, None).await;
    let app = common::build_test_app(pool);
    put_json(
        app.router(),
        &format!("/api/vaxal/projects/{}/assign", project.id),
        Some(&common::staff_token(&app, &staff)),
        json!({}),
    )
    .await;

    let inbox = body_json(
        get(
            app.router(),
            "/api/engineer/notifications",
            Some(&common::engineer_token(&app, &engineer)),
        )
        .await,
    )
    .await;
    let id = inbox["data"][0]["id"].as_i64().unwrap();

    let response = post_json(
        app.router(),
        &format!("/api/engineer/notifications/{id}/read"),
        Some(&common::engineer_token(&app, &other)),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Field reports notify the staff member who created the project.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_inbox_receives_reports(pool: PgPool) {
    let staff = common::create_staff(&pool, "staff@vaxal.test", ROLE_VAXAL_STAFF).await;
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let project =
        common::create_ready_project(&pool, "VX-5200", engineer.id, Some(staff.id)).await;
    let app = common::build_test_app(pool);
    let staff_token = common::staff_token(&app, &staff);
    put_json(
        app.router(),
        &format!("/api/vaxal/projects/{}/assign", project.id),
        Some(&staff_token),
        json!({}),
    )
    .await;
    post_json(
        app.router(),
        &format!("/api/engineer/projects/{}/report", project.id),
        Some(&common::engineer_token(&app, &engineer)),
        json!({ "work_summary": "All done" }),
    )
    .await;

    let inbox = body_json(get(app.router(), "/api/vaxal/notifications", Some(&staff_token)).await).await;
    let notifications = inbox["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["notification_type"], "PROJECT_REPORTED");
    assert_eq!(notifications[0]["project_id"], project.id);
}
