//! Duty Slip Actions
//!
//! 任务单的五个动作：取号、创建、列表、单取、状态机更新。创建与
//! 更新都会在落库前重算派生合计并跑全套交叉校验；更新还要经过
//! 流转表和版本守卫。

use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::core::ServerState;
use crate::db::repository::duty_slip;
use crate::slips::{totals, transitions, validate};
use shared::envelopes::{DutySaveAck, NextIdBody, SaveAck, SlipBody, SlipListBody};
use shared::models::{DutySlip, DutySlipDraft, DutySlipPatch, DutySlipStatus};
use shared::{AppError, AppResult};

/// action=getNextDutySlipId - the number the next save would take
pub async fn next_id(state: &ServerState) -> AppResult<Response> {
    let next_id = duty_slip::next_id(&state.pool).await?;
    Ok(Json(NextIdBody { next_id }).into_response())
}

/// action=saveDutySlip - create a slip; blank `DS_No` means assign one
pub async fn save(state: &ServerState, draft: DutySlipDraft) -> AppResult<Response> {
    let mut slip = new_slip(draft);

    // Blank driver mobile fills from the roster when the driver is known
    if slip.driver_mobile.trim().is_empty()
        && let Some(entry) = state.directory.driver(&slip.driver_name)
    {
        slip.driver_mobile = entry.mobile.clone();
    }

    state
        .signatures
        .resolve_link(&mut slip.auth_signature_link)
        .await?;
    state
        .signatures
        .resolve_link(&mut slip.guest_signature_link)
        .await?;

    totals::apply(&mut slip);
    validate::check(&slip)?;

    if slip.ds_no.is_empty() {
        duty_slip::create_auto_id(&state.pool, &mut slip).await?;
    } else {
        duty_slip::create(&state.pool, &slip).await?;
    }
    tracing::info!(ds_no = %slip.ds_no, "duty slip created");

    Ok(Json(DutySaveAck::saved(slip.ds_no)).into_response())
}

/// action=getAllDutySlips - summaries, newest first
pub async fn list(state: &ServerState) -> AppResult<Response> {
    let slips = duty_slip::list_summaries(&state.pool).await?;
    Ok(Json(SlipListBody { slips }).into_response())
}

/// action=getDutySlipById&id= - the full field mapping
pub async fn get_by_id(state: &ServerState, id: &str) -> AppResult<Response> {
    let slip = duty_slip::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("duty slip {id} not found")))?;
    Ok(Json(SlipBody { slip }).into_response())
}

/// action=updateDutySlip - transition-checked, version-guarded write
///
/// The patch's `Status` names the step being taken; its write mask
/// decides which keys land. Whatever survives the mask goes through
/// the same totals/validation pipeline as a create.
pub async fn update(state: &ServerState, patch: DutySlipPatch) -> AppResult<Response> {
    let mut slip = duty_slip::find_by_id(&state.pool, &patch.ds_no)
        .await?
        .ok_or_else(|| AppError::not_found(format!("duty slip {} not found", patch.ds_no)))?;

    transitions::ensure(slip.status, patch.status)?;
    transitions::apply_patch(&mut slip, &patch);

    state
        .signatures
        .resolve_link(&mut slip.auth_signature_link)
        .await?;
    state
        .signatures
        .resolve_link(&mut slip.guest_signature_link)
        .await?;

    totals::apply(&mut slip);
    validate::check(&slip)?;

    slip.version = patch.version + 1;
    duty_slip::update_guarded(&state.pool, &slip, patch.version).await?;
    tracing::info!(ds_no = %slip.ds_no, status = slip.status.as_str(), "duty slip updated");

    Ok(Json(SaveAck::saved(format!("Duty slip {} updated", slip.ds_no))).into_response())
}

/// Stamp the server-owned columns onto an incoming draft. Status is
/// always `New` here, never what the client claims.
fn new_slip(draft: DutySlipDraft) -> DutySlip {
    DutySlip {
        ds_no: draft
            .ds_no
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        organisation: draft.organisation,
        guest_name: draft.guest_name,
        guest_mobile: draft.guest_mobile,
        booking_id: draft.booking_id,
        reporting_time: draft.reporting_time,
        reporting_address: draft.reporting_address,
        vehicle_type: draft.vehicle_type,
        vehicle_no: draft.vehicle_no,
        driver_name: draft.driver_name,
        driver_mobile: draft.driver_mobile,
        routing: draft.routing,
        special_instructions: draft.special_instructions,
        assignment: draft.assignment,
        date_out: draft.date_out,
        date_in: draft.date_in,
        driver_time_out: draft.driver_time_out,
        driver_time_in: draft.driver_time_in,
        driver_km_out: draft.driver_km_out,
        driver_km_in: draft.driver_km_in,
        time_out: draft.time_out,
        time_in: draft.time_in,
        km_out: draft.km_out,
        km_in: draft.km_in,
        auth_signature_link: draft.auth_signature_link,
        guest_signature_link: draft.guest_signature_link,
        status: DutySlipStatus::New,
        version: 1,
        timestamp: shared::util::now_millis(),
        ..DutySlip::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_conversion_forces_server_owned_fields() {
        let draft = DutySlipDraft {
            ds_no: Some("  2001 ".into()),
            guest_name: "A. Rao".into(),
            ..DutySlipDraft::default()
        };
        let slip = new_slip(draft);
        assert_eq!(slip.ds_no, "2001");
        assert_eq!(slip.status, DutySlipStatus::New);
        assert_eq!(slip.version, 1);
        assert!(slip.timestamp > 0);
        assert_eq!(slip.driver_total_hrs, "");
        assert!(slip.total_days.is_none());
    }

    #[test]
    fn blank_ds_no_requests_assignment() {
        let slip = new_slip(DutySlipDraft::default());
        assert_eq!(slip.ds_no, "");

        let slip = new_slip(DutySlipDraft {
            ds_no: Some("   ".into()),
            ..DutySlipDraft::default()
        });
        assert_eq!(slip.ds_no, "");
    }
}
