//! 账单推导 — 12 小时计费块
//!
//! Trips bill in 12-hour slabs. Each slab carries the base rate, an
//! included-kms allowance and a driver batta; kms beyond the allowance
//! bill per-km, tolls and permits pass through. All arithmetic stays
//! in `Decimal`; the wire converts to floats at the edge.
//!
//! The breakdown is recomputed on the server from the raw inputs —
//! client-side arithmetic in the payload is discarded.

use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::{HoursField, InvoiceDraft};
use shared::{AppError, AppResult, fields};
use std::str::FromStr;

/// Hours per billing slab
const SLAB_HOURS: i64 = 12;

/// Status stamped on every stored invoice; there is no update path
pub const GENERATED: &str = "Generated";

/// Rate-card inputs, absent fields read as zero
#[derive(Debug, Clone, Copy, Default)]
pub struct RateCard {
    pub base_rate: Decimal,
    pub included_kms_per_slab: Decimal,
    pub extra_km_rate: Decimal,
    pub batta_rate: Decimal,
    pub tolls: Decimal,
    pub permits: Decimal,
}

impl RateCard {
    pub fn from_draft(draft: &InvoiceDraft) -> Self {
        RateCard {
            base_rate: draft.base_rate.unwrap_or_default(),
            included_kms_per_slab: draft.included_kms_per_slab.unwrap_or_default(),
            extra_km_rate: draft.extra_km_rate.unwrap_or_default(),
            batta_rate: draft.batta_rate.unwrap_or_default(),
            tolls: draft.tolls.unwrap_or_default(),
            permits: draft.permits.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakdown {
    pub billing_slabs: i64,
    pub package_cost: Decimal,
    pub extra_kms: Decimal,
    pub extra_km_cost: Decimal,
    pub batta_cost: Decimal,
    pub grand_total: Decimal,
}

/// Trip hours from whatever the form sent: the slip's
/// `"<int> hrs <int> mins"` text, a bare number, or junk (reads as 0)
pub fn parse_hours(value: &HoursField) -> Decimal {
    match value {
        HoursField::Number(n) => Decimal::try_from(*n).unwrap_or_default(),
        HoursField::Text(s) => parse_hours_text(s),
    }
}

fn parse_hours_text(value: &str) -> Decimal {
    let lower = value.to_lowercase();
    if !lower.contains("hr") && !lower.contains("min") {
        return Decimal::from_str(lower.trim()).unwrap_or_default();
    }

    // Token scan: the number preceding an "hrs"/"mins" token is its value
    let mut hours = Decimal::ZERO;
    let mut minutes = Decimal::ZERO;
    let mut pending: Option<Decimal> = None;
    for token in lower.split_whitespace() {
        if let Ok(n) = Decimal::from_str(token) {
            pending = Some(n);
        } else if token.starts_with("hr") {
            if let Some(n) = pending.take() {
                hours = n;
            }
        } else if token.starts_with("min")
            && let Some(n) = pending.take()
        {
            minutes = n;
        }
    }
    hours + minutes / Decimal::from(60)
}

/// `ceil(hours / 12)`, floored at zero
pub fn billing_slabs(hours: Decimal) -> i64 {
    let slabs = (hours / Decimal::from(SLAB_HOURS)).ceil();
    slabs.to_i64().unwrap_or(0).max(0)
}

/// The pure derivation: `(hours, kms, rates) → breakdown`
pub fn derive_breakdown(hours: Decimal, total_kms: Decimal, rates: &RateCard) -> Breakdown {
    let slabs = billing_slabs(hours);
    let slab_count = Decimal::from(slabs);

    let package_cost = slab_count * rates.base_rate;
    let included_kms = slab_count * rates.included_kms_per_slab;
    let extra_kms = (total_kms - included_kms).max(Decimal::ZERO);
    let extra_km_cost = extra_kms * rates.extra_km_rate;
    let batta_cost = slab_count * rates.batta_rate;
    let grand_total = package_cost + extra_km_cost + batta_cost + rates.tolls + rates.permits;

    Breakdown {
        billing_slabs: slabs,
        package_cost,
        extra_kms,
        extra_km_cost,
        batta_cost,
        grand_total,
    }
}

/// Save-time checks: the booking id is mandatory (it names the
/// invoice) and money never goes negative
pub fn validate_draft(draft: &InvoiceDraft) -> AppResult<()> {
    validate_required_text(&draft.booking_id, fields::BOOKING_ID, MAX_SHORT_TEXT_LEN)?;
    for (value, field) in [
        (draft.total_kms, "Total_Kms"),
        (draft.base_rate, "Base_Rate"),
        (draft.included_kms_per_slab, "Included_Kms_Per_Slab"),
        (draft.extra_km_rate, "Extra_Km_Rate"),
        (draft.batta_rate, "Batta_Rate"),
        (draft.tolls, "Tolls"),
        (draft.permits, "Permits"),
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
