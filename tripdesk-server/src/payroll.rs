//! 工资单工作流 — 审批状态机与净额计算
//!
//! Salary slips move Pending Approval → Approved → Finalized, one step
//! at a time. Pay fields may only change while the slip is pending;
//! the employee's signature arrives with the approval; a finalized
//! slip never changes again.

use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use rust_decimal::Decimal;
use shared::models::{SalarySlip, SalarySlipPatch, SalarySlipStatus};
use shared::{AppError, AppResult};

/// `basic + allowances − deductions`, floored at zero
pub fn net_pay(
    basic: Option<Decimal>,
    allowances: Option<Decimal>,
    deductions: Option<Decimal>,
) -> Decimal {
    let total =
        basic.unwrap_or_default() + allowances.unwrap_or_default() - deductions.unwrap_or_default();
    total.max(Decimal::ZERO)
}

/// Workflow table: strictly forward, plus pending re-edits
pub fn allowed(from: SalarySlipStatus, to: SalarySlipStatus) -> bool {
    use SalarySlipStatus::*;
    matches!(
        (from, to),
        (PendingApproval, PendingApproval) | (PendingApproval, Approved) | (Approved, Finalized)
    )
}

pub fn ensure(from: SalarySlipStatus, to: SalarySlipStatus) -> AppResult<()> {
    if allowed(from, to) {
        return Ok(());
    }
    Err(AppError::lifecycle(format!(
        "salary slip cannot move from '{}' to '{}'",
        from.as_str(),
        to.as_str()
    )))
}

/// Merge an update onto the slip per its transition. Pay-field keys on
/// an approval or finalize are dropped, mirroring the duty-slip masks.
pub fn apply_patch(slip: &mut SalarySlip, patch: &SalarySlipPatch) {
    match patch.status {
        SalarySlipStatus::PendingApproval => {
            if let Some(name) = &patch.employee_name {
                slip.employee_name = name.clone();
            }
            if let Some(period) = &patch.pay_period {
                slip.pay_period = period.clone();
            }
            if patch.basic.is_some() {
                slip.basic = patch.basic;
            }
            if patch.allowances.is_some() {
                slip.allowances = patch.allowances;
            }
            if patch.deductions.is_some() {
                slip.deductions = patch.deductions;
            }
            slip.net_pay = net_pay(slip.basic, slip.allowances, slip.deductions);
        }
        SalarySlipStatus::Approved => {
            if let Some(link) = &patch.employee_signature_link {
                slip.employee_signature_link = link.clone();
            }
        }
        SalarySlipStatus::Finalized => {}
    }
    slip.status = patch.status;
}

/// Save-time checks over the assembled slip
pub fn validate_slip(slip: &SalarySlip) -> AppResult<()> {
    validate_required_text(&slip.employee_name, "Employee_Name", MAX_NAME_LEN)?;
    validate_pay_period(&slip.pay_period)?;
    for (value, field) in [
        (slip.basic, "Basic"),
        (slip.allowances, "Allowances"),
        (slip.deductions, "Deductions"),
    ] {
        if let Some(v) = value
            && v < Decimal::ZERO
        {
            return Err(AppError::validation(format!(
                "{field}: must not be negative, got {v}"
            )));
        }
    }
    Ok(())
}

/// Pay periods are `YYYY-MM`
fn validate_pay_period(value: &str) -> AppResult<()> {
    let well_formed = value.split_once('-').is_some_and(|(year, month)| {
        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && month.len() == 2
            && month.parse::<u32>().is_ok_and(|m| (1..=12).contains(&m))
    });
    if !well_formed {
        return Err(AppError::validation(format!(
            "Pay_Period: expected YYYY-MM, got '{value}'"
        )));
    }
    Ok(())
}
