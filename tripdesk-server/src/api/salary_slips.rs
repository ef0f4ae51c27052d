//! Salary Slip Actions
//!
//! 工资单走 Pending Approval → Approved → Finalized 的单向审批流。
//! 创建即待审，净额永远由服务器算；审批那一步带上员工签名。

use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::core::ServerState;
use crate::db::repository::salary_slip;
use crate::payroll;
use shared::envelopes::{SalarySaveAck, SaveAck, SlipBody, SlipListBody};
use shared::models::{SalarySlip, SalarySlipDraft, SalarySlipPatch, SalarySlipStatus};
use shared::{AppError, AppResult};

/// action=saveSalarySlip - create a pending slip, number assigned
pub async fn save(state: &ServerState, draft: SalarySlipDraft) -> AppResult<Response> {
    let mut slip = SalarySlip {
        slip_no: String::new(),
        employee_name: draft.employee_name,
        pay_period: draft.pay_period,
        basic: draft.basic,
        allowances: draft.allowances,
        deductions: draft.deductions,
        net_pay: payroll::net_pay(draft.basic, draft.allowances, draft.deductions),
        employee_signature_link: String::new(),
        status: SalarySlipStatus::PendingApproval,
        version: 1,
        timestamp: shared::util::now_millis(),
    };
    payroll::validate_slip(&slip)?;

    salary_slip::create_auto_id(&state.pool, &mut slip).await?;
    tracing::info!(slip_no = %slip.slip_no, "salary slip created");

    Ok(Json(SalarySaveAck::saved(slip.slip_no)).into_response())
}

/// action=getAllSalarySlips - summaries, newest first
pub async fn list(state: &ServerState) -> AppResult<Response> {
    let slips = salary_slip::list_summaries(&state.pool).await?;
    Ok(Json(SlipListBody { slips }).into_response())
}

/// action=getSalarySlipById&id=
pub async fn get_by_id(state: &ServerState, id: &str) -> AppResult<Response> {
    let slip = salary_slip::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("salary slip {id} not found")))?;
    Ok(Json(SlipBody { slip }).into_response())
}

/// action=updateSalarySlip - workflow step, version-guarded
pub async fn update(state: &ServerState, patch: SalarySlipPatch) -> AppResult<Response> {
    let mut slip = salary_slip::find_by_id(&state.pool, &patch.slip_no)
        .await?
        .ok_or_else(|| AppError::not_found(format!("salary slip {} not found", patch.slip_no)))?;

    payroll::ensure(slip.status, patch.status)?;
    payroll::apply_patch(&mut slip, &patch);

    state
        .signatures
        .resolve_link(&mut slip.employee_signature_link)
        .await?;

    payroll::validate_slip(&slip)?;

    slip.version = patch.version + 1;
    salary_slip::update_guarded(&state.pool, &slip, patch.version).await?;
    tracing::info!(slip_no = %slip.slip_no, status = slip.status.as_str(), "salary slip updated");

    Ok(Json(SaveAck::saved(format!("Salary slip {} updated", slip.slip_no))).into_response())
}
