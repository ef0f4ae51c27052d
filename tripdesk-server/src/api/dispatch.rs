//! Action Dispatch
//!
//! 门户页面调用的唯一业务端点：`/exec?action=<verb>`。读动作走 GET，
//! 写动作走 POST + JSON body。动作名未知或方法不对都是 400，响应体
//! 统一 `{error}`，所以页面端只看一种失败形状。

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use serde::Deserialize;

use super::{duty_slips, invoices, salary_slips, sheets, signatures};
use crate::core::ServerState;
use shared::{AppError, AppResult};

/// 读动作 (GET)
const GET_ACTIONS: &[&str] = &[
    "getNextDutySlipId",
    "getAllDutySlips",
    "getDutySlipById",
    "getAllInvoices",
    "getInvoiceById",
    "getInvoiceByPublicId",
    "getAllSalarySlips",
    "getSalarySlipById",
    "getAllBookings",
    "getAllRoutes",
    "getAllReviews",
    "getAllFinancialEntries",
    "getDirectory",
];

/// 写动作 (POST)
const POST_ACTIONS: &[&str] = &[
    "saveDutySlip",
    "updateDutySlip",
    "saveInvoice",
    "saveSalarySlip",
    "updateSalarySlip",
    "saveBooking",
    "saveRoute",
    "saveReview",
    "saveFinancialEntry",
    "uploadSignature",
];

pub fn router() -> Router<ServerState> {
    Router::new().route("/exec", get(dispatch_get).post(dispatch_post))
}

/// Query parameters of the dispatch endpoint. All optional so a missing
/// `action` produces the `{error}` body instead of an extractor
/// rejection in some other shape.
#[derive(Debug, Deserialize)]
pub struct ExecParams {
    #[serde(default)]
    action: Option<String>,
    /// Record id for the by-id fetches
    #[serde(default)]
    id: Option<String>,
    /// Shareable invoice id
    #[serde(rename = "publicId", default)]
    public_id: Option<String>,
}

/// GET /exec?action= - read-side dispatch
async fn dispatch_get(
    State(state): State<ServerState>,
    Query(params): Query<ExecParams>,
) -> AppResult<Response> {
    let action = require(&params.action, "action")?;
    match action {
        "getNextDutySlipId" => duty_slips::next_id(&state).await,
        "getAllDutySlips" => duty_slips::list(&state).await,
        "getDutySlipById" => duty_slips::get_by_id(&state, require(&params.id, "id")?).await,
        "getAllInvoices" => invoices::list(&state).await,
        "getInvoiceById" => invoices::get_by_id(&state, require(&params.id, "id")?).await,
        "getInvoiceByPublicId" => {
            invoices::get_by_public_id(&state, require(&params.public_id, "publicId")?).await
        }
        "getAllSalarySlips" => salary_slips::list(&state).await,
        "getSalarySlipById" => salary_slips::get_by_id(&state, require(&params.id, "id")?).await,
        "getAllBookings" => sheets::list_bookings(&state).await,
        "getAllRoutes" => sheets::list_routes(&state).await,
        "getAllReviews" => sheets::list_reviews(&state).await,
        "getAllFinancialEntries" => sheets::list_entries(&state).await,
        "getDirectory" => sheets::get_directory(&state).await,
        other => Err(wrong_verb(other, POST_ACTIONS, "POST")),
    }
}

/// POST /exec?action= - write-side dispatch
async fn dispatch_post(
    State(state): State<ServerState>,
    Query(params): Query<ExecParams>,
    body: axum::body::Bytes,
) -> AppResult<Response> {
    let action = require(&params.action, "action")?;
    let body = parse_json(&body)?;
    match action {
        "saveDutySlip" => duty_slips::save(&state, parse_body(body)?).await,
        "updateDutySlip" => duty_slips::update(&state, parse_body(body)?).await,
        "saveInvoice" => invoices::save(&state, parse_body(body)?).await,
        "saveSalarySlip" => salary_slips::save(&state, parse_body(body)?).await,
        "updateSalarySlip" => salary_slips::update(&state, parse_body(body)?).await,
        "saveBooking" => sheets::save_booking(&state, parse_body(body)?).await,
        "saveRoute" => sheets::save_route(&state, parse_body(body)?).await,
        "saveReview" => sheets::save_review(&state, parse_body(body)?).await,
        "saveFinancialEntry" => sheets::save_entry(&state, parse_body(body)?).await,
        "uploadSignature" => signatures::upload(&state, parse_body(body)?).await,
        other => Err(wrong_verb(other, GET_ACTIONS, "GET")),
    }
}

/// Trimmed, non-empty query parameter or a 400 naming it
fn require<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("missing '{name}' parameter"))),
    }
}

/// Unknown verb, or a known verb reached with the wrong method
fn wrong_verb(action: &str, other_side: &[&str], wanted: &str) -> AppError {
    if other_side.contains(&action) {
        AppError::validation(format!("action '{action}' must use {wanted}"))
    } else {
        AppError::validation(format!("unknown action: {action}"))
    }
}

fn parse_json(body: &[u8]) -> AppResult<serde_json::Value> {
    if body.is_empty() {
        return Err(AppError::validation("request body is required"));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("request body is not valid JSON: {e}")))
}

/// Typed payload out of the already-parsed JSON body
fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::validation(format!("invalid payload: {e}")))
}
