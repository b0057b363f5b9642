//! Integration tests for the engineer calendar.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use vaxal_core::roles::{ROLE_ENGINEER, ROLE_VAXAL_STAFF};

use common::{body_json, delete, get, post_json, put_json};

const RANGE: &str = "from=2026-10-01T00:00:00Z&to=2026-11-01T00:00:00Z";

/// Engineers create and list their own availability blocks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_availability(pool: PgPool) {
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let other = common::create_engineer(&pool, "other@vaxal.test", ROLE_ENGINEER, None).await;
    let app = common::build_test_app(pool);
    let token = common::engineer_token(&app, &engineer);

    let response = post_json(
        app.router(),
        "/api/engineer/calendar",
        Some(&token),
        json!({
            "title": "Free morning",
            "start_at": "2026-10-21T00:00:00Z",
            "end_at": "2026-10-21T03:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "AVAILABLE");

    let mine = body_json(
        get(
            app.router(),
            &format!("/api/engineer/calendar?{RANGE}"),
            Some(&token),
        )
        .await,
    )
    .await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let theirs = body_json(
        get(
            app.router(),
            &format!("/api/engineer/calendar?{RANGE}"),
            Some(&common::engineer_token(&app, &other)),
        )
        .await,
    )
    .await;
    assert!(theirs["data"].as_array().unwrap().is_empty());
}

/// End must be after start.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejects_inverted_range(pool: PgPool) {
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/engineer/calendar",
        Some(&common::engineer_token(&app, &engineer)),
        json!({ "start_at": "2026-10-21T03:00:00Z", "end_at": "2026-10-21T00:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Another engineer's event is invisible for update and delete.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_edit_foreign_event(pool: PgPool) {
    let owner = common::create_engineer(&pool, "owner@vaxal.test", ROLE_ENGINEER, None).await;
    let other = common::create_engineer(&pool, "other@vaxal.test", ROLE_ENGINEER, None).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json(
            app.router(),
            "/api/engineer/calendar",
            Some(&common::engineer_token(&app, &owner)),
            json!({ "start_at": "2026-10-21T00:00:00Z", "end_at": "2026-10-21T03:00:00Z" }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let other_token = common::engineer_token(&app, &other);

    let update = put_json(
        app.router(),
        &format!("/api/engineer/calendar/{id}"),
        Some(&other_token),
        json!({ "title": "mine now" }),
    )
    .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let removed = delete(
        app.router(),
        &format!("/api/engineer/calendar/{id}"),
        Some(&other_token),
    )
    .await;
    assert_eq!(removed.status(), StatusCode::NOT_FOUND);
}

/// Bookings created by assignment are read-only for the engineer, and show
/// up on the staff view of the engineer's calendar.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirmed_booking_is_read_only(pool: PgPool) {
    let staff = common::create_staff(&pool, "staff@vaxal.test", ROLE_VAXAL_STAFF).await;
    let engineer = common::create_engineer(&pool, "eng@vaxal.test", ROLE_ENGINEER, None).await;
    let project = common::create_ready_project(&pool, "VX-3000", engineer.id, None).await;
    let app = common::build_test_app(pool);
    let staff_token = common::staff_token(&app, &staff);

    let assigned = body_json(
        put_json(
            app.router(),
            &format!("/api/vaxal/projects/{}/assign", project.id),
            Some(&staff_token),
            json!({}),
        )
        .await,
    )
    .await;
    let event_id = assigned["data"]["calendar_event"]["id"].as_i64().unwrap();
    let token = common::engineer_token(&app, &engineer);

    let update = put_json(
        app.router(),
        &format!("/api/engineer/calendar/{event_id}"),
        Some(&token),
        json!({ "title": "moved" }),
    )
    .await;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);

    let removed = delete(
        app.router(),
        &format!("/api/engineer/calendar/{event_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(removed.status(), StatusCode::FORBIDDEN);

    let staff_view = body_json(
        get(
            app.router(),
            &format!("/api/vaxal/engineers/{}/calendar?{RANGE}", engineer.id),
            Some(&staff_token),
        )
        .await,
    )
    .await;
    let events = staff_view["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["status"], "CONFIRMED");
}
