//! 生命周期流转 — 状态机与写入掩码
//!
//! A slip is created `New`, reworked by the office (`Updated by
//! Manager`), closed by the driver from their shared link, then closed
//! by the client. The patch's `Status` names the transition being
//! taken, and each transition may only write the columns in its mask.
//! Out-of-mask keys are dropped, not rejected.

use rust_decimal::Decimal;
use shared::models::{DutySlip, DutySlipPatch, DutySlipStatus};
use shared::{AppError, AppResult, fields};

/// Transition table. `New` is a create-only state; the office can
/// rework a slip from anywhere, closes move strictly forward but may
/// repeat (a driver or client correcting their own close).
pub fn allowed(from: DutySlipStatus, to: DutySlipStatus) -> bool {
    use DutySlipStatus::*;
    match to {
        New => false,
        UpdatedByManager => true,
        ClosedByDriver => matches!(from, New | UpdatedByManager | ClosedByDriver),
        ClosedByClient => matches!(from, ClosedByDriver | ClosedByClient),
    }
}

pub fn ensure(from: DutySlipStatus, to: DutySlipStatus) -> AppResult<()> {
    if allowed(from, to) {
        return Ok(());
    }
    Err(AppError::lifecycle(format!(
        "duty slip cannot move from '{}' to '{}'",
        from.as_str(),
        to.as_str()
    )))
}

/// Columns each transition may write
pub fn write_mask(transition: DutySlipStatus) -> &'static [&'static str] {
    match transition {
        DutySlipStatus::New => &[],
        DutySlipStatus::UpdatedByManager => fields::DUTY_SLIP_HEADERS,
        DutySlipStatus::ClosedByDriver => fields::DRIVER_CLOSE_FIELDS,
        DutySlipStatus::ClosedByClient => fields::CLIENT_CLOSE_FIELDS,
    }
}

/// Merge the patch onto the loaded slip under its transition's mask and
/// move the status. Keys absent from the patch leave the column alone.
pub fn apply_patch(slip: &mut DutySlip, patch: &DutySlipPatch) {
    for header in write_mask(patch.status) {
        apply_field(slip, patch, header);
    }
    slip.status = patch.status;
}

fn copy_text(target: &mut String, source: &Option<String>) {
    if let Some(value) = source {
        *target = value.clone();
    }
}

fn copy_reading(target: &mut Option<Decimal>, source: Option<Decimal>) {
    if source.is_some() {
        *target = source;
    }
}

/// One column by header name. Server-owned columns (status, version,
/// timestamp, derived totals) have no arm here on purpose.
fn apply_field(slip: &mut DutySlip, patch: &DutySlipPatch, header: &str) {
    match header {
        fields::ORGANISATION => copy_text(&mut slip.organisation, &patch.organisation),
        fields::GUEST_NAME => copy_text(&mut slip.guest_name, &patch.guest_name),
        fields::GUEST_MOBILE => copy_text(&mut slip.guest_mobile, &patch.guest_mobile),
        fields::BOOKING_ID => copy_text(&mut slip.booking_id, &patch.booking_id),
        fields::REPORTING_TIME => copy_text(&mut slip.reporting_time, &patch.reporting_time),
        fields::REPORTING_ADDRESS => {
            copy_text(&mut slip.reporting_address, &patch.reporting_address)
        }
        fields::VEHICLE_TYPE => copy_text(&mut slip.vehicle_type, &patch.vehicle_type),
        fields::VEHICLE_NO => copy_text(&mut slip.vehicle_no, &patch.vehicle_no),
        fields::DRIVER_NAME => copy_text(&mut slip.driver_name, &patch.driver_name),
        fields::DRIVER_MOBILE => copy_text(&mut slip.driver_mobile, &patch.driver_mobile),
        fields::ROUTING => copy_text(&mut slip.routing, &patch.routing),
        fields::SPECIAL_INSTRUCTIONS => {
            copy_text(&mut slip.special_instructions, &patch.special_instructions)
        }
        fields::ASSIGNMENT => copy_text(&mut slip.assignment, &patch.assignment),
        fields::DATE_OUT => copy_text(&mut slip.date_out, &patch.date_out),
        fields::DATE_IN => copy_text(&mut slip.date_in, &patch.date_in),
        fields::DRIVER_TIME_OUT => copy_text(&mut slip.driver_time_out, &patch.driver_time_out),
        fields::DRIVER_TIME_IN => copy_text(&mut slip.driver_time_in, &patch.driver_time_in),
        fields::DRIVER_KM_OUT => copy_reading(&mut slip.driver_km_out, patch.driver_km_out),
        fields::DRIVER_KM_IN => copy_reading(&mut slip.driver_km_in, patch.driver_km_in),
        fields::TIME_OUT => copy_text(&mut slip.time_out, &patch.time_out),
        fields::TIME_IN => copy_text(&mut slip.time_in, &patch.time_in),
        fields::KM_OUT => copy_reading(&mut slip.km_out, patch.km_out),
        fields::KM_IN => copy_reading(&mut slip.km_in, patch.km_in),
        fields::AUTH_SIGNATURE_LINK => {
            copy_text(&mut slip.auth_signature_link, &patch.auth_signature_link)
        }
        fields::GUEST_SIGNATURE_LINK => {
            copy_text(&mut slip.guest_signature_link, &patch.guest_signature_link)
        }
        _ => {}
    }
}
