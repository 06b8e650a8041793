//! HTTP surface exercised through the router without binding a socket.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{balanced_tree, frame_base64, pipeline, pipeline_with, ScriptedDetector};
use prana::api::{create_router, AppState};
use prana::PosePipeline;

fn state(pipeline: PosePipeline, max_tracked_users: usize) -> AppState {
    AppState::new(Arc::new(pipeline), Duration::from_secs(10), max_tracked_users)
}

fn app() -> Router {
    create_router(state(pipeline(Some(balanced_tree()), 138, 1), 100), 1024 * 1024)
}

fn frame_request(user: &str) -> Value {
    json!({ "image": frame_base64(), "pose_name": "tree_pose", "user": user })
}

fn feedback_len(body: &Value) -> usize {
    body["feedback"].as_array().map_or(0, Vec::len)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn health_lists_classes() {
    let app = app();
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"]["input_dim"], 138);
    assert_eq!(body["model"]["classes"], json!(["warrior_pose", "tree_pose"]));
}

#[tokio::test]
async fn predict_frame_requires_fields() {
    let app = app();
    let (status, body) = post(&app, "/predict_frame", json!({ "image": frame_base64() })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Missing required fields: pose_name");

    let (_, body) = post(&app, "/predict_frame", json!({})).await;
    assert_eq!(body["message"], "Missing required fields: image, pose_name");
}

#[tokio::test]
async fn predict_frame_rejects_undecodable_image() {
    let app = app();
    let (status, body) = post(
        &app,
        "/predict_frame",
        json!({ "image": "data:image/jpeg;base64,bm90IGFuIGltYWdl", "pose_name": "tree_pose" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn predict_frame_introduces_once_per_user() {
    let app = app();
    let request = json!({
        "image": format!("data:image/png;base64,{}", frame_base64()),
        "pose_name": "tree_pose",
        "user": "asha",
    });

    let (status, first) = post(&app, "/predict_frame", request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pose"], "tree_pose");
    assert_eq!(first["user"], "asha");
    assert_eq!(first["feedback"].as_array().unwrap().len(), 4);

    let (_, second) = post(&app, "/predict_frame", request).await;
    assert_eq!(
        second["feedback"],
        json!(["Nice work, you are steady in tree pose."])
    );
}

#[tokio::test]
async fn explicit_first_time_wins() {
    let app = app();
    let (_, body) = post(
        &app,
        "/predict_frame",
        json!({ "image": frame_base64(), "pose_name": "tree_pose", "first_time": false, "user": "ravi" }),
    )
    .await;

    assert_eq!(body["feedback"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn diet_and_sleep_tracking() {
    let app = app();

    let (status, diet) = post(
        &app,
        "/track_diet",
        json!({ "meals": ["oats", "dal"], "water_intake": 1.0, "calories": 1500 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(diet["analysis"]["current_state"]["meal_count"], 2);
    assert!(diet["analysis"]["improvements"].is_array());

    let (status, sleep) = post(
        &app,
        "/track_sleep",
        json!({ "hours": 5, "quality": 4, "sleep_time": "01:30", "wake_time": "06:30", "interruptions": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sleep["analysis"]["current_state"]["duration_category"],
        "Insufficient"
    );
}

#[tokio::test]
async fn health_status_and_nutrition() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/health_status",
        json!({ "height": 175, "weight": 70, "age": 30, "gender": "male" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["health_info"]["bmi"], 22.86);
    assert_eq!(body["health_info"]["weight_status"], "Normal weight");

    let (status, body) = post(&app, "/api/health_status", json!({ "height": 175 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: weight, age, gender");

    let (status, body) = post(
        &app,
        "/api/health_status",
        json!({ "height": 0, "weight": 70, "age": 30, "gender": "male" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_MEASUREMENT");

    let (status, body) = post(
        &app,
        "/api/nutrition_recommendation",
        json!({
            "height": 175, "weight": 70, "age": 30, "gender": "male",
            "activity_level": "sedentary", "diseases": ["diabetes"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let plan = &body["recommendations"]["nutrition_plan"];
    assert_eq!(plan["daily_calories"], 2034);
    assert_eq!(plan["protein_grams"], 152);
    assert!(body["recommendations"]["disease_specific_advice"]["diabetes"].is_object());
}

#[tokio::test]
async fn introduction_waits_for_a_detected_body() {
    let detector = ScriptedDetector::new([None, Some(balanced_tree()), Some(balanced_tree())]);
    let app = create_router(state(pipeline_with(Box::new(detector), 138, 1), 100), 1024 * 1024);

    let (status, empty) = post(&app, "/predict_frame", frame_request("asha")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["pose"], "no_pose_detected");

    let (_, first) = post(&app, "/predict_frame", frame_request("asha")).await;
    assert_eq!(feedback_len(&first), 4);

    let (_, second) = post(&app, "/predict_frame", frame_request("asha")).await;
    assert_eq!(feedback_len(&second), 1);
}

#[tokio::test]
async fn failed_request_keeps_the_introduction() {
    let app = app();
    let (status, _) = post(
        &app,
        "/predict_frame",
        json!({ "image": "bm90IGFuIGltYWdl", "pose_name": "tree_pose", "user": "asha" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = post(&app, "/predict_frame", frame_request("asha")).await;
    assert_eq!(feedback_len(&body), 4);
}

#[tokio::test]
async fn introductions_are_bounded() {
    let state = state(pipeline(Some(balanced_tree()), 138, 1), 2);
    let app = create_router(state.clone(), 1024 * 1024);

    for user in ["a", "b", "c"] {
        let (_, body) = post(&app, "/predict_frame", frame_request(user)).await;
        assert_eq!(feedback_len(&body), 4, "{user}");
    }
    assert_eq!(state.tracked_introductions(), 2);

    // "a" was dropped to make room for "c"
    let (_, body) = post(&app, "/predict_frame", frame_request("a")).await;
    assert_eq!(feedback_len(&body), 4);
    let (_, body) = post(&app, "/predict_frame", frame_request("c")).await;
    assert_eq!(feedback_len(&body), 1);
}
