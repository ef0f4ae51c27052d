//! 调度端点契约测试
//!
//! The failure half of `/exec`: unknown actions, verbs on the wrong
//! method, missing parameters and non-JSON bodies all come back as
//! `{error}` with the right status. Plus the health probe.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use tripdesk_server::{Config, ServerState, build_app};

async fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (dir, build_app(state))
}

fn get(path_and_query: &str) -> Request<Body> {
    Request::builder()
        .uri(path_and_query)
        .body(Body::empty())
        .unwrap()
}

fn post_raw(action: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/exec?action={action}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn unknown_action_is_a_validation_error() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("/exec?action=makeCoffee")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown action: makeCoffee");

    let (status, body) = send(&app, post_raw("makeCoffee", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown action: makeCoffee");
}

#[tokio::test]
async fn known_action_on_the_wrong_method_names_the_right_one() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("/exec?action=saveDutySlip")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "action 'saveDutySlip' must use POST");

    let (status, body) = send(&app, post_raw("getAllDutySlips", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "action 'getAllDutySlips' must use GET");
}

#[tokio::test]
async fn missing_parameters_are_named() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("/exec")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing 'action' parameter");

    // blank counts as missing
    let (status, body) = send(&app, get("/exec?action=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing 'action' parameter");

    let (status, body) = send(&app, get("/exec?action=getDutySlipById")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing 'id' parameter");

    let (status, body) = send(&app, get("/exec?action=getInvoiceByPublicId")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing 'publicId' parameter");
}

#[tokio::test]
async fn post_body_must_be_json() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, post_raw("saveBooking", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "request body is required");

    let (status, body) = send(&app, post_raw("saveBooking", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("request body is not valid JSON")
    );
}

#[tokio::test]
async fn payloads_missing_mandatory_keys_are_rejected() {
    let (_dir, app) = test_app().await;

    // an update without Status and Version cannot name its transition
    let (status, body) = send(&app, post_raw("updateDutySlip", r#"{"DS_No":"1001"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid payload"));
}

#[tokio::test]
async fn failure_bodies_carry_exactly_the_error_key() {
    let (_dir, app) = test_app().await;

    for request in [
        get("/exec?action=makeCoffee"),
        get("/exec?action=getDutySlipById&id=9999"),
    ] {
        let (_, body) = send(&app, request).await;
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("error"));
    }
}

#[tokio::test]
async fn health_endpoint_reports_the_version() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "version": env!("CARGO_PKG_VERSION")}));
}
