//! 派生合计 — Total_Days / Driver_Total_Hrs / Driver_Total_Kms
//!
//! These three columns are always recomputed on the server from the
//! raw fields; whatever the form submitted for them is discarded.
//! Missing or unparseable inputs leave the derived value blank rather
//! than failing the save.

use crate::utils::time::{clock_minutes, try_clock, try_date};
use rust_decimal::Decimal;
use shared::models::DutySlip;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Recompute all derived columns in place
pub fn apply(slip: &mut DutySlip) {
    slip.total_days = total_days(&slip.date_out, &slip.date_in);
    slip.driver_total_hrs = driver_total_hrs(&slip.driver_time_out, &slip.driver_time_in);
    slip.driver_total_kms = driver_total_kms(slip.driver_km_out, slip.driver_km_in);
}

/// Days spanned, counting both endpoints. Blank when either date is
/// missing or the trip ends before it starts.
pub fn total_days(date_out: &str, date_in: &str) -> Option<i64> {
    let out = try_date(date_out)?;
    let back = try_date(date_in)?;
    if back < out {
        return None;
    }
    Some((back - out).num_days() + 1)
}

/// Duty duration formatted `"H hrs M mins"`. A time-in numerically
/// earlier than time-out reads as rolling past midnight once.
pub fn driver_total_hrs(time_out: &str, time_in: &str) -> String {
    let (Some(out), Some(back)) = (try_clock(time_out), try_clock(time_in)) else {
        return String::new();
    };
    let minutes = duration_minutes(clock_minutes(out), clock_minutes(back));
    format!("{} hrs {} mins", minutes / 60, minutes % 60)
}

/// Minutes from `out` to `back` on a clock face, wrapping midnight when
/// the end reads earlier than the start
pub(crate) fn duration_minutes(out: i64, back: i64) -> i64 {
    if back < out {
        back + MINUTES_PER_DAY - out
    } else {
        back - out
    }
}

/// Kms driven formatted `"N.N Kms"`, blank unless the difference is
/// strictly positive
pub fn driver_total_kms(km_out: Option<Decimal>, km_in: Option<Decimal>) -> String {
    let (Some(out), Some(back)) = (km_out, km_in) else {
        return String::new();
    };
    let mut diff = back - out;
    if diff <= Decimal::ZERO {
        return String::new();
    }
    diff.rescale(1);
    format!("{diff} Kms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_days_counts_both_endpoints() {
        assert_eq!(total_days("2025-07-01", "2025-07-01"), Some(1));
        assert_eq!(total_days("2025-07-01", "2025-07-03"), Some(3));
    }

    #[test]
    fn total_days_blank_when_reversed_or_missing() {
        assert_eq!(total_days("2025-07-03", "2025-07-01"), None);
        assert_eq!(total_days("", "2025-07-01"), None);
        assert_eq!(total_days("2025-07-01", "soon"), None);
    }

    #[test]
    fn hours_roll_past_midnight() {
        assert_eq!(driver_total_hrs("22:00", "06:00"), "8 hrs 0 mins");
        assert_eq!(driver_total_hrs("09:15", "17:45"), "8 hrs 30 mins");
        assert_eq!(driver_total_hrs("10:00", "10:00"), "0 hrs 0 mins");
    }

    #[test]
    fn hours_blank_on_missing_input() {
        assert_eq!(driver_total_hrs("", "06:00"), "");
        assert_eq!(driver_total_hrs("22:00", "late"), "");
    }

    #[test]
    fn kms_formatted_to_one_decimal() {
        let out = Some(Decimal::new(1000, 1)); // 100.0
        let back = Some(Decimal::new(1455, 1)); // 145.5
        assert_eq!(driver_total_kms(out, back), "45.5 Kms");

        let whole = Some(Decimal::new(150, 0));
        assert_eq!(driver_total_kms(out, whole), "50.0 Kms");
    }

    #[test]
    fn kms_blank_unless_positive() {
        let a = Some(Decimal::new(100, 0));
        assert_eq!(driver_total_kms(a, a), "");
        assert_eq!(driver_total_kms(Some(Decimal::new(200, 0)), a), "");
        assert_eq!(driver_total_kms(None, a), "");
    }
}
