//! 工资单审批流集成测试
//!
//! Pending Approval → Approved → Finalized over the dispatch endpoint:
//! net-pay computation, the one-step-at-a-time workflow, pay-field
//! masking after approval and version conflicts.

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
    let (status, body) = send(app, get(&format!("action=getSalarySlipById&id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    body["slip"].clone()
}

fn sample_draft() -> Value {
    json!({
        "Employee_Name": "R. Kumar",
        "Pay_Period": "2025-07",
        "Basic": 18000.0,
        "Allowances": 2500.0,
        "Deductions": 500.0,
    })
}

#[tokio::test]
async fn save_computes_net_pay_and_assigns_the_number() {
    let (_dir, app) = test_app().await;

    let (status, ack) = send(&app, post("saveSalarySlip", &sample_draft())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);
    assert_eq!(ack["slipNo"], "1001");
    assert_eq!(ack["message"], "Salary slip 1001 saved");

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Employee_Name"], "R. Kumar");
    assert_eq!(slip["Net_Pay"], 20000.0);
    assert_eq!(slip["Status"], "Pending Approval");
    assert_eq!(slip["Version"], 1);
    assert_eq!(slip["Employee_Signature_Link"], "");
}

#[tokio::test]
async fn approval_workflow_runs_one_step_at_a_time() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    // approval carries the employee's signature
    let patch = json!({
        "Slip_No": "1001", "Status": "Approved", "Version": 1,
        "Employee_Signature_Link": "/signatures/abc.png",
    });
    let (status, ack) = send(&app, post("updateSalarySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["message"], "Salary slip 1001 updated");

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Approved");
    assert_eq!(slip["Version"], 2);
    assert_eq!(slip["Employee_Signature_Link"], "/signatures/abc.png");

    let patch = json!({"Slip_No": "1001", "Status": "Finalized", "Version": 2});
    let (status, _) = send(&app, post("updateSalarySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Finalized");
    assert_eq!(slip["Version"], 3);
}

#[tokio::test]
async fn finalize_before_approval_is_rejected() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    let patch = json!({"Slip_No": "1001", "Status": "Finalized", "Version": 1});
    let (status, body) = send(&app, post("updateSalarySlip", &patch)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "salary slip cannot move from 'Pending Approval' to 'Finalized'"
    );

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Pending Approval");
}

#[tokio::test]
async fn pay_edits_after_approval_are_dropped() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    // pay keys on the approval step are outside its write mask
    let patch = json!({
        "Slip_No": "1001", "Status": "Approved", "Version": 1,
        "Basic": 99999.0,
        "Employee_Signature_Link": "/signatures/abc.png",
    });
    let (status, _) = send(&app, post("updateSalarySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Basic"], 18000.0);
    assert_eq!(slip["Net_Pay"], 20000.0);
}

#[tokio::test]
async fn pending_reedit_recomputes_net_pay() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    let patch = json!({
        "Slip_No": "1001", "Status": "Pending Approval", "Version": 1,
        "Deductions": 1500.0,
    });
    let (status, _) = send(&app, post("updateSalarySlip", &patch)).await;
    assert_eq!(status, StatusCode::OK);

    let slip = fetch_slip(&app, "1001").await;
    assert_eq!(slip["Status"], "Pending Approval");
    assert_eq!(slip["Version"], 2);
    assert_eq!(slip["Deductions"], 1500.0);
    assert_eq!(slip["Net_Pay"], 19000.0);
}

#[tokio::test]
async fn stale_version_is_a_conflict() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    let approve = json!({"Slip_No": "1001", "Status": "Approved", "Version": 1});
    let (status, _) = send(&app, post("updateSalarySlip", &approve)).await;
    assert_eq!(status, StatusCode::OK);

    // finalize carrying the token from before the approval
    let finalize = json!({"Slip_No": "1001", "Status": "Finalized", "Version": 1});
    let (status, body) = send(&app, post("updateSalarySlip", &finalize)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "salary slip 1001 was modified by someone else (version 2, update carried 1)"
    );
}

#[tokio::test]
async fn pay_period_must_be_a_month() {
    let (_dir, app) = test_app().await;

    let mut draft = sample_draft();
    draft["Pay_Period"] = json!("July 2025");
    let (status, body) = send(&app, post("saveSalarySlip", &draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Pay_Period: expected YYYY-MM, got 'July 2025'");
}

#[tokio::test]
async fn listing_shows_the_workflow_status() {
    let (_dir, app) = test_app().await;
    send(&app, post("saveSalarySlip", &sample_draft())).await;

    let approve = json!({"Slip_No": "1001", "Status": "Approved", "Version": 1});
    send(&app, post("updateSalarySlip", &approve)).await;

    let (status, body) = send(&app, get("action=getAllSalarySlips")).await;
    assert_eq!(status, StatusCode::OK);
    let slips = body["slips"].as_array().unwrap();
    assert_eq!(slips.len(), 1);
    assert_eq!(slips[0]["Slip_No"], "1001");
    assert_eq!(slips[0]["Pay_Period"], "2025-07");
    assert_eq!(slips[0]["Status"], "Approved");
}
