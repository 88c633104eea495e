// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Import admission API tests against an offline database.
//!
//! Every storage read fails in offline mode, so these also check that the
//! endpoints degrade to `auto` / no source instead of returning errors.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn post_json(app: axum::Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = common::create_test_app();
    let (status, json) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_admission_degrades_to_allow_when_storage_unavailable() {
    let (app, _) = common::create_test_app();

    let (status, json) = post_json(
        app,
        "/api/imports/admission",
        json!({ "user_id": "u1", "workout_id": "w1", "source": "strava" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["should_proceed"], true);
    assert_eq!(json["user_preference"], "auto");
    assert!(json.get("existing_source").is_none());
}

#[tokio::test]
async fn test_admission_new_workout() {
    let (app, _) = common::create_test_app();

    let (status, json) = post_json(
        app,
        "/api/imports/admission",
        json!({ "user_id": "u1", "source": "garmin" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["should_proceed"], true);
}

#[tokio::test]
async fn test_admission_rejects_empty_user_id() {
    let (app, _) = common::create_test_app();

    let (status, json) = post_json(
        app,
        "/api/imports/admission",
        json!({ "user_id": "", "workout_id": "w1", "source": "strava" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_admission_rejects_empty_workout_id() {
    let (app, _) = common::create_test_app();

    let (status, _) = post_json(
        app,
        "/api/imports/admission",
        json!({ "user_id": "u1", "workout_id": "", "source": "strava" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admission_rejects_non_provider_source() {
    let (app, _) = common::create_test_app();

    for source in ["manual", "auto", "polar"] {
        let (status, _) = post_json(
            app.clone(),
            "/api/imports/admission",
            json!({ "user_id": "u1", "workout_id": "w1", "source": source }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "source {}", source);
    }
}

#[tokio::test]
async fn test_plan_returns_decision_per_candidate() {
    let (app, _) = common::create_test_app();

    let (status, json) = post_json(
        app,
        "/api/imports/plan",
        json!({ "user_id": "u1", "workout_ids": ["w1", null, "w3"], "source": "garmin" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let decisions = json["decisions"].as_array().unwrap();
    assert_eq!(decisions.len(), 3);
    assert!(decisions.iter().all(|d| d["should_proceed"] == true));
}

#[tokio::test]
async fn test_plan_rejects_too_many_candidates() {
    let (app, _) = common::create_test_app();

    let ids: Vec<String> = (0..=trainlog_sync::routes::imports::MAX_PLAN_CANDIDATES)
        .map(|i| format!("w{}", i))
        .collect();

    let (status, _) = post_json(
        app,
        "/api/imports/plan",
        json!({ "user_id": "u1", "workout_ids": ids, "source": "strava" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_preference_defaults_to_auto() {
    let (app, _) = common::create_test_app();
    let (status, json) = get_json(app, "/api/users/u1/activity-source").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], "u1");
    assert_eq!(json["preference"], "auto");
}

#[tokio::test]
async fn test_workout_source_is_null_when_unknown() {
    let (app, _) = common::create_test_app();
    let (status, json) = get_json(app, "/api/workouts/w1/activity-source").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["workout_id"], "w1");
    assert!(json["source"].is_null());
}
