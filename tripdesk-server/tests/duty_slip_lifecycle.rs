//! 任务单生命周期集成测试
//!
//! Drives the `/exec` dispatch endpoint over a real temp-dir database:
//! number assignment, save/fetch round trips, the four-status lifecycle
//! with its write masks, optimistic-lock conflicts and roster autofill.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;
use tripdesk_server::{Config, ServerState, build_app};

/// Fresh app over a throwaway work dir. The dir must outlive the app:
/// the database lives inside it.
async fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (dir, build_app(state))
}

/// Same, with a driver roster in place before startup
async fn test_app_with_roster() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("directory.json"),
        r#"{"drivers":[{"name":"S. Verma","mobile":"9000000001"}]}"#,
    )
    .unwrap();
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (dir, build_app(state))
}

fn get(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/exec?{query}"))
        .body(Body::empty())
        .unwrap()
}

fn post(action: &str, body: &Value) -> Request<Body> {
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

async fn fetch_slip(app: &Router, id: &str) -> Value {
    let (status, body) = send(app, get(&format!("action=getDutySlipById&id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    body["slip"].clone()
}

#[tokio::test]
async fn next_id_starts_at_1001_and_tracks_the_max() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("action=getNextDutySlipId")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nextId"], 1001);

    // auto-assignment consumes the same counter
    let (status, ack) = send(&app, post("saveDutySlip", &json!({"Guest_Name": "A. Rao"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["dsNo"], "1001");

    // a manual number moves the counter past itself
    let manual = json!({"DS_No": "2500", "Guest_Name": "B. Singh"});
    let (status, _) = send(&app, post("saveDutySlip", &manual)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("action=getNextDutySlipId")).await;
    assert_eq!(body["nextId"], 2501);
}

#[tokio::test]
async fn save_then_fetch_round_trips_the_submitted_fields() {
    let (_dir, app) = test_app().await;

    let draft = json!({
        "Organisation": "Acme Tours",
        "Guest_Name": "A. Rao",
        "Guest_Mobile": "9876543210",
        "Booking_ID": "BK-7",
        "Reporting_Time": "08:30",
        "Reporting_Address": "12 MG Road",
        "Vehicle_Type": "Sedan",
        "Vehicle_No": "KA-01-AB-1234",
        "Driver_Name": "S. Verma",
        "Driver_Mobile": "9000000001",
        "Routing": "Airport - City - Airport",
        "Date_Out": "2025-07-10",
        "Date_In": "2025-07-12",
        // server-owned keys in the payload must be discarded
        "Status": "Closed by Client",
        "Version": 99,
        "Total_Days": 42,
    });
    let (status, ack) = send(&app, post("saveDutySlip", &draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);
    assert_eq!(ack["message"], "Duty slip 1001 saved");

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["DS_No"], "1001");
    assert_eq!(slip["Organisation"], "Acme Tours");
    assert_eq!(slip["Guest_Name"], "A. Rao");
    assert_eq!(slip["Vehicle_No"], "KA-01-AB-1234");
    assert_eq!(slip["Routing"], "Airport - City - Airport");
    assert_eq!(slip["Status"], "New");
    assert_eq!(slip["Version"], 1);
    assert!(slip["Timestamp"].as_i64().unwrap() > 0);
    // derived, not taken from the payload
    assert_eq!(slip["Total_Days"], 3);
    assert_eq!(slip["Driver_Total_Hrs"], "");
}

#[tokio::test]
async fn listing_returns_one_line_per_slip_newest_first() {
    let (_dir, app) = test_app().await;

    let (status, _) = send(&app, post("saveDutySlip", &json!({"Guest_Name": "A. Rao"}))).await;
    assert_eq!(status, StatusCode::OK);
    // the listing orders on the millisecond timestamp
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, _) = send(&app, post("saveDutySlip", &json!({"Guest_Name": "B. Singh"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("action=getAllDutySlips")).await;
    assert_eq!(status, StatusCode::OK);
    let slips = body["slips"].as_array().unwrap();
    assert_eq!(slips.len(), 2);
    assert_eq!(slips[0]["DS_No"], "1002");
    assert_eq!(slips[0]["Guest_Name"], "B. Singh");
    assert_eq!(slips[1]["DS_No"], "1001");
}

#[tokio::test]
async fn full_lifecycle_new_to_closed_by_client() {
    let (_dir, app) = test_app().await;

    let draft = json!({
        "Guest_Name": "A. Rao",
        "Driver_Name": "S. Verma",
        "Date_Out": "2025-07-10",
        "Date_In": "2025-07-10",
    });
    let (status, ack) = send(&app, post("saveDutySlip", &draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["dsNo"], "1001");

    // office rework: the manager records the departure half of both
    // windows when the vehicle goes out
    let patch = json!({
        "DS_No": "1001", "Status": "Updated by Manager", "Version": 1,
        "Vehicle_No": "KA-05-Z-9999", "Routing": "City tour",
        "Driver_Time_Out": "09:15", "Driver_Km_Out": 12500.0,
        "Time_Out": "09:30", "Km_Out": 12510.0,
    });
    let (status, ack) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["message"], "Duty slip 1001 updated");

    // driver close from the shared link; the guest-name key is outside
    // this transition's write mask and must be dropped
    let patch = json!({
        "DS_No": "1001", "Status": "Closed by Driver", "Version": 2,
        "Driver_Time_In": "17:45", "Driver_Km_In": 12645.5,
        "Guest_Name": "Mallory",
    });
    let (status, _) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Closed by Driver");
    assert_eq!(slip["Version"], 3);
    assert_eq!(slip["Guest_Name"], "A. Rao");
    assert_eq!(slip["Vehicle_No"], "KA-05-Z-9999");
    assert_eq!(slip["Driver_Total_Hrs"], "8 hrs 30 mins");
    assert_eq!(slip["Driver_Total_Kms"], "145.5 Kms");

    // client close inside the driver's window
    let patch = json!({
        "DS_No": "1001", "Status": "Closed by Client", "Version": 3,
        "Time_In": "17:30", "Km_In": 12640.0,
    });
    let (status, _) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Closed by Client");
    assert_eq!(slip["Version"], 4);
    assert_eq!(slip["Time_In"], "17:30");
    assert_eq!(slip["Km_In"], 12640.0);
    // driver columns survived the client close untouched
    assert_eq!(slip["Driver_Km_In"], 12645.5);
}

#[tokio::test]
async fn client_close_cannot_skip_the_driver() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveDutySlip", &json!({"Guest_Name": "A. Rao"}))).await;

    let patch = json!({
        "DS_No": "1001", "Status": "Closed by Client", "Version": 1,
        "Time_Out": "09:00", "Time_In": "18:00",
    });
    let (status, body) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "duty slip cannot move from 'New' to 'Closed by Client'"
    );

    // nothing persisted
    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "New");
    assert_eq!(slip["Version"], 1);
}

#[tokio::test]
async fn stale_version_is_a_conflict() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveDutySlip", &json!({"Guest_Name": "A. Rao"}))).await;

    let patch = json!({
        "DS_No": "1001", "Status": "Updated by Manager", "Version": 1,
        "Routing": "City tour",
    });
    let (status, _) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    // replaying the same edit now carries a stale token
    let (status, body) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "duty slip 1001 was modified by someone else (version 2, update carried 1)"
    );

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Version"], 2);
}

#[tokio::test]
async fn duplicate_ds_no_is_a_conflict() {
    let (_dir, app) = test_app().await;

    let draft = json!({"DS_No": "3001", "Guest_Name": "A. Rao"});
    let (status, _) = send(&app, post("saveDutySlip", &draft)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, post("saveDutySlip", &draft)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duty slip 3001 already exists");
}

#[tokio::test]
async fn missing_slip_is_not_found() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, get("action=getDutySlipById&id=9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "duty slip 9999 not found");

    let patch = json!({"DS_No": "9999", "Status": "Updated by Manager", "Version": 1});
    let (status, _) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn backwards_odometer_readings_are_rejected() {
    let (_dir, app) = test_app().await;
    let draft = json!({"Guest_Name": "A. Rao", "Driver_Km_Out": 12500.0});
    send(&app, post("saveDutySlip", &draft)).await;

    // the driver's end reading sits below the recorded start
    let patch = json!({
        "DS_No": "1001", "Status": "Closed by Driver", "Version": 1,
        "Driver_Km_In": 12400.0,
    });
    let (status, body) = send(&app, post("updateDutySlip", &patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Driver_Km_In"));

    // the rejected close left the row alone
    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "New");
    assert_eq!(slip["Version"], 1);
}

#[tokio::test]
async fn driver_mobile_autofills_from_the_roster() {
    let (_dir, app) = test_app_with_roster().await;

    let (status, _) = send(
        &app,
        post("saveDutySlip", &json!({"Driver_Name": "S. Verma"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Driver_Mobile"], "9000000001");

    // a submitted number wins over the roster
    let draft = json!({"Driver_Name": "S. Verma", "Driver_Mobile": "8111111111"});
    let (status, _) = send(&app, post("saveDutySlip", &draft)).await;
    assert_eq!(status, StatusCode::OK);
    let slip = fetch_slip(&app, "1002").await;
    assert_eq!(slip["Driver_Mobile"], "8111111111");
}
