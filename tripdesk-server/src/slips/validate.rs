//! 跨字段校验 — 司机/客户窗口一致性
//!
//! The driver's duty window must fully contain the guest's: the guest
//! cannot leave before the driver started, return after the driver
//! finished, or report odometer readings outside the driver's pair.
//! Time comparisons happen on a timeline anchored at the driver's
//! departure so a duty that wraps midnight once still validates; the
//! odometer rules are plain comparisons with equality allowed.
//!
//! Every rejection names the offending column so the form can mark it.

use crate::utils::time::{clock_minutes, parse_clock, parse_date, try_clock};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_text_len,
};
use shared::models::DutySlip;
use shared::{AppError, AppResult, fields};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Full pass: formats, lengths, then the cross-field window rules
pub fn check(slip: &DutySlip) -> AppResult<()> {
    check_formats(slip)?;
    check_lengths(slip)?;
    check_kms(slip)?;
    check_times(slip)
}

/// Non-empty dates and clocks must parse; blank means not yet filled in
fn check_formats(slip: &DutySlip) -> AppResult<()> {
    for (value, field) in [
        (&slip.date_out, fields::DATE_OUT),
        (&slip.date_in, fields::DATE_IN),
    ] {
        if !value.is_empty() {
            parse_date(value, field)?;
        }
    }
    for (value, field) in [
        (&slip.driver_time_out, fields::DRIVER_TIME_OUT),
        (&slip.driver_time_in, fields::DRIVER_TIME_IN),
        (&slip.time_out, fields::TIME_OUT),
        (&slip.time_in, fields::TIME_IN),
    ] {
        if !value.is_empty() {
            parse_clock(value, field)?;
        }
    }
    Ok(())
}

fn check_lengths(slip: &DutySlip) -> AppResult<()> {
    for (value, field, max) in [
        (&slip.organisation, fields::ORGANISATION, MAX_NAME_LEN),
        (&slip.guest_name, fields::GUEST_NAME, MAX_NAME_LEN),
        (&slip.guest_mobile, fields::GUEST_MOBILE, MAX_SHORT_TEXT_LEN),
        (&slip.booking_id, fields::BOOKING_ID, MAX_SHORT_TEXT_LEN),
        (&slip.reporting_time, fields::REPORTING_TIME, MAX_SHORT_TEXT_LEN),
        (&slip.reporting_address, fields::REPORTING_ADDRESS, MAX_ADDRESS_LEN),
        (&slip.vehicle_type, fields::VEHICLE_TYPE, MAX_SHORT_TEXT_LEN),
        (&slip.vehicle_no, fields::VEHICLE_NO, MAX_SHORT_TEXT_LEN),
        (&slip.driver_name, fields::DRIVER_NAME, MAX_NAME_LEN),
        (&slip.driver_mobile, fields::DRIVER_MOBILE, MAX_SHORT_TEXT_LEN),
        (&slip.routing, fields::ROUTING, MAX_NOTE_LEN),
        (&slip.special_instructions, fields::SPECIAL_INSTRUCTIONS, MAX_NOTE_LEN),
        (&slip.assignment, fields::ASSIGNMENT, MAX_NOTE_LEN),
    ] {
        validate_text_len(value, field, max)?;
    }
    Ok(())
}

/// Odometer rules: each pair must not run backwards, and the guest's
/// readings must sit inside the driver's
fn check_kms(slip: &DutySlip) -> AppResult<()> {
    if let (Some(out), Some(back)) = (slip.driver_km_out, slip.driver_km_in)
        && back < out
    {
        return Err(AppError::validation(format!(
            "{}: end reading {back} is below the start reading {out}",
            fields::DRIVER_KM_IN
        )));
    }
    if let (Some(out), Some(back)) = (slip.km_out, slip.km_in)
        && back < out
    {
        return Err(AppError::validation(format!(
            "{}: end reading {back} is below the start reading {out}",
            fields::KM_IN
        )));
    }
    if let (Some(driver), Some(guest)) = (slip.driver_km_out, slip.km_out)
        && guest < driver
    {
        return Err(AppError::validation(format!(
            "{}: guest start reading {guest} is below the driver's {driver}",
            fields::KM_OUT
        )));
    }
    if let (Some(driver), Some(guest)) = (slip.driver_km_in, slip.km_in)
        && guest > driver
    {
        return Err(AppError::validation(format!(
            "{}: guest end reading {guest} is beyond the driver's {driver}",
            fields::KM_IN
        )));
    }
    Ok(())
}

/// Window containment on the timeline anchored at the driver's
/// departure. The driver's own pair never fails here: an end earlier
/// than the start is the sanctioned midnight rollover.
fn check_times(slip: &DutySlip) -> AppResult<()> {
    let Some(anchor) = try_clock(&slip.driver_time_out).map(clock_minutes) else {
        return Ok(());
    };
    let offset = |t: &str| try_clock(t).map(|c| (clock_minutes(c) - anchor).rem_euclid(MINUTES_PER_DAY));

    let driver_end = offset(&slip.driver_time_in);
    let guest_start = offset(&slip.time_out);
    let guest_end = offset(&slip.time_in);

    if let (Some(end), Some(start)) = (driver_end, guest_start)
        && start > end
    {
        return Err(AppError::validation(format!(
            "{}: guest window starts after the driver's duty ended",
            fields::TIME_OUT
        )));
    }
    if let (Some(start), Some(end)) = (guest_start, guest_end)
        && end < start
    {
        return Err(AppError::validation(format!(
            "{}: guest time in falls before {}",
            fields::TIME_IN,
            fields::TIME_OUT
        )));
    }
    if let (Some(driver), Some(guest)) = (driver_end, guest_end)
        && guest > driver
    {
        return Err(AppError::validation(format!(
            "{}: guest time in runs past {}",
            fields::TIME_IN,
            fields::DRIVER_TIME_IN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn slip() -> DutySlip {
        DutySlip {
            driver_time_out: "10:00".into(),
            driver_time_in: "18:00".into(),
            time_out: "10:30".into(),
            time_in: "17:30".into(),
            driver_km_out: Some(Decimal::new(1000, 1)),
            driver_km_in: Some(Decimal::new(2000, 1)),
            km_out: Some(Decimal::new(1050, 1)),
            km_in: Some(Decimal::new(1950, 1)),
            ..DutySlip::default()
        }
    }

    #[test]
    fn contained_window_passes() {
        assert!(check(&slip()).is_ok());
    }

    #[test]
    fn equal_boundaries_pass() {
        let mut s = slip();
        s.time_out = s.driver_time_out.clone();
        s.time_in = s.driver_time_in.clone();
        s.km_out = s.driver_km_out;
        s.km_in = s.driver_km_in;
        assert!(check(&s).is_ok());
    }

    #[test]
    fn guest_end_past_driver_end_rejected() {
        let mut s = slip();
        s.time_in = "18:30".into();
        let err = check(&s).unwrap_err();
        assert!(err.to_string().contains(fields::TIME_IN));
    }

    #[test]
    fn overnight_duty_validates_on_rolled_timeline() {
        let mut s = slip();
        s.driver_time_out = "22:00".into();
        s.driver_time_in = "06:00".into();
        s.time_out = "23:00".into();
        s.time_in = "05:00".into();
        assert!(check(&s).is_ok());

        // 07:00 is an hour past the driver's 06:00 return
        s.time_in = "07:00".into();
        assert!(check(&s).is_err());
    }

    #[test]
    fn backwards_odometer_rejected() {
        let mut s = slip();
        s.driver_km_in = Some(Decimal::new(900, 1));
        let err = check(&s).unwrap_err();
        assert!(err.to_string().contains(fields::DRIVER_KM_IN));
    }

    #[test]
    fn guest_odometer_outside_driver_pair_rejected() {
        let mut s = slip();
        s.km_in = Some(Decimal::new(2100, 1));
        assert!(check(&s).is_err());

        let mut s = slip();
        s.km_out = Some(Decimal::new(900, 1));
        assert!(check(&s).is_err());
    }

    #[test]
    fn malformed_clock_rejected_with_field_name() {
        let mut s = slip();
        s.driver_time_out = "ten".into();
        let err = check(&s).unwrap_err();
        assert!(err.to_string().contains(fields::DRIVER_TIME_OUT));
    }

    #[test]
    fn blank_fields_skip_their_rules() {
        let s = DutySlip::default();
        assert!(check(&s).is_ok());
    }
}
