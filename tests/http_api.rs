//! Behavioural integration tests for the HTTP façade.
//!
//! Each test drives the router directly with `tower::ServiceExt::oneshot`,
//! exercising the JSON wire shapes and the status-code mapping the façade
//! guarantees: 201 on create/update, 404 for unknown ids and malformed
//! input (fail-closed), 406 for scheduling conflicts.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code indexes JSON values after shape checks"
)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use taskboard::tracker::adapters::http::{AppState, build_router};
use taskboard::tracker::services::TaskStore;
use tower::ServiceExt;

fn router() -> Router {
    build_router(AppState::new(TaskStore::new(), None))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    };
    let response = app.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn create_task_assigns_an_id_and_defaults_status() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "name": "Wash floor", "description": "Weekly chore" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "NEW");
    assert_eq!(body["name"], "Wash floor");
}

#[tokio::test]
async fn get_of_unknown_task_is_404() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/tasks/7", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn scheduled_tasks_report_derived_end_time() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({
            "name": "Call plumber",
            "startTime": "2024-10-23T18:00:00Z",
            "durationMinutes": 45,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["startTime"], "2024-10-23T18:00:00Z");
    assert_eq!(body["durationMinutes"], 45);
    assert_eq!(body["endTime"], "2024-10-23T18:45:00Z");
}

#[tokio::test]
async fn overlapping_window_is_rejected_with_406() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({
            "name": "First",
            "startTime": "2024-10-23T18:00:00Z",
            "durationMinutes": 10,
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({
            "name": "Second",
            "startTime": "2024-10-23T18:05:00Z",
            "durationMinutes": 5,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body["error"].is_string());

    let (_, tasks) = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(tasks.as_array().expect("task list").len(), 1);
}

#[tokio::test]
async fn post_with_id_updates_the_stored_task() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "name": "Original", "status": "IN_PROGRESS" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "id": 1, "name": "Renamed" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Renamed");
    // Absent status on an update preserves the stored one.
    assert_eq!(body["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn delete_removes_the_task() {
    let app = router();
    send(&app, Method::POST, "/tasks", Some(json!({ "name": "Doomed" }))).await;

    let (status, _) = send(&app, Method::DELETE, "/tasks/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn epic_aggregates_follow_subtask_updates() {
    let app = router();
    send(&app, Method::POST, "/epics", Some(json!({ "name": "Move house" }))).await;
    send(
        &app,
        Method::POST,
        "/subtasks",
        Some(json!({ "epicId": 1, "name": "Pack books" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/subtasks",
        Some(json!({ "epicId": 1, "name": "Hire van" })),
    )
    .await;

    let (_, epic) = send(&app, Method::GET, "/epics/1", None).await;
    assert_eq!(epic["status"], "NEW");
    assert_eq!(epic["subtaskIds"], json!([2, 3]));

    let (status, _) = send(
        &app,
        Method::POST,
        "/subtasks",
        Some(json!({ "id": 2, "epicId": 1, "name": "Pack books", "status": "DONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, epic) = send(&app, Method::GET, "/epics/1", None).await;
    assert_eq!(epic["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn epic_subtasks_endpoint_lists_children() {
    let app = router();
    send(&app, Method::POST, "/epics", Some(json!({ "name": "Epic" }))).await;
    send(
        &app,
        Method::POST,
        "/subtasks",
        Some(json!({ "epicId": 1, "name": "Child" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/epics/1/subtasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let children = body.as_array().expect("subtask list");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["epicId"], 1);

    let (status, body) = send(&app, Method::GET, "/epics/9/subtasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn subtask_for_unknown_epic_is_404() {
    let app = router();
    let (status, _) = send(
        &app,
        Method::POST,
        "/subtasks",
        Some(json!({ "epicId": 5, "name": "Orphan" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_deduplicates_views_in_recency_order() {
    let app = router();
    send(&app, Method::POST, "/tasks", Some(json!({ "name": "One" }))).await;
    send(&app, Method::POST, "/epics", Some(json!({ "name": "Two" }))).await;

    send(&app, Method::GET, "/tasks/1", None).await;
    send(&app, Method::GET, "/epics/2", None).await;
    send(&app, Method::GET, "/tasks/1", None).await;

    let (status, body) = send(&app, Method::GET, "/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().expect("history list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["kind"], "EPIC");
    assert_eq!(entries[1]["kind"], "TASK");
    assert_eq!(entries[1]["id"], 1);
}

#[tokio::test]
async fn prioritized_view_orders_by_start_time() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({
            "name": "Later",
            "startTime": "2024-10-23T19:00:00Z",
            "durationMinutes": 10,
        })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({
            "name": "Sooner",
            "startTime": "2024-10-23T18:00:00Z",
            "durationMinutes": 10,
        })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/prioritized", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().expect("prioritized list");
    assert_eq!(entries[0]["name"], "Sooner");
    assert_eq!(entries[1]["name"], "Later");
}

#[tokio::test]
async fn malformed_body_fails_closed_with_404() {
    let app = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
