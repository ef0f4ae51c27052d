//! Duty Slip Model
//!
//! One row per trip. Field names on the wire are the sheet headers
//! (`DS_No`, `Guest_Name`, ...) declared field-by-field with explicit
//! `#[serde(rename)]` so the mapping is checked at compile time instead
//! of being derived from header strings at runtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a duty slip.
///
/// The labels are exactly what the portal pages display and what the
/// sheet stores. The set is closed: anything else found in storage is a
/// data error, never passed through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DutySlipStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Updated by Manager")]
    UpdatedByManager,
    #[serde(rename = "Closed by Driver")]
    ClosedByDriver,
    #[serde(rename = "Closed by Client")]
    ClosedByClient,
}

impl DutySlipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DutySlipStatus::New => "New",
            DutySlipStatus::UpdatedByManager => "Updated by Manager",
            DutySlipStatus::ClosedByDriver => "Closed by Driver",
            DutySlipStatus::ClosedByClient => "Closed by Client",
        }
    }
}

/// Error for status labels outside the closed set
#[derive(Debug, thiserror::Error)]
#[error("unknown duty slip status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DutySlipStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "New" => Ok(DutySlipStatus::New),
            "Updated by Manager" => Ok(DutySlipStatus::UpdatedByManager),
            "Closed by Driver" => Ok(DutySlipStatus::ClosedByDriver),
            "Closed by Client" => Ok(DutySlipStatus::ClosedByClient),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Duty slip entity (行车任务单)
///
/// Dates are `YYYY-MM-DD` strings, clock fields are `HH:MM` strings,
/// odometer readings are decimals. `Version` and `Timestamp` are
/// server-managed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DutySlip {
    #[serde(rename = "DS_No")]
    pub ds_no: String,
    #[serde(rename = "Organisation", default)]
    pub organisation: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Guest_Mobile", default)]
    pub guest_mobile: String,
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: String,
    #[serde(rename = "Reporting_Time", default)]
    pub reporting_time: String,
    #[serde(rename = "Reporting_Address", default)]
    pub reporting_address: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Vehicle_No", default)]
    pub vehicle_no: String,
    #[serde(rename = "Driver_Name", default)]
    pub driver_name: String,
    #[serde(rename = "Driver_Mobile", default)]
    pub driver_mobile: String,
    #[serde(rename = "Routing", default)]
    pub routing: String,
    #[serde(rename = "Special_Instructions", default)]
    pub special_instructions: String,
    #[serde(rename = "Assignment", default)]
    pub assignment: String,

    // === Usage window ===
    #[serde(rename = "Date_Out", default)]
    pub date_out: String,
    #[serde(rename = "Date_In", default)]
    pub date_in: String,
    /// Derived: whole days in the usage window, blank when dates invert
    #[serde(rename = "Total_Days", default)]
    pub total_days: Option<i64>,

    // === Driver-reported pair ===
    #[serde(rename = "Driver_Time_Out", default)]
    pub driver_time_out: String,
    #[serde(rename = "Driver_Time_In", default)]
    pub driver_time_in: String,
    #[serde(rename = "Driver_Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_out: Option<Decimal>,
    #[serde(rename = "Driver_Km_In", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_in: Option<Decimal>,

    // === Customer-reported pair ===
    #[serde(rename = "Time_Out", default)]
    pub time_out: String,
    #[serde(rename = "Time_In", default)]
    pub time_in: String,
    #[serde(rename = "Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub km_out: Option<Decimal>,
    #[serde(rename = "Km_In", default, with = "rust_decimal::serde::float_option")]
    pub km_in: Option<Decimal>,

    // === Derived totals ===
    /// `"H hrs M mins"`, blank until the driver pair is complete
    #[serde(rename = "Driver_Total_Hrs", default)]
    pub driver_total_hrs: String,
    /// `"N.N Kms"`, blank unless the reading advanced
    #[serde(rename = "Driver_Total_Kms", default)]
    pub driver_total_kms: String,

    // === Signatures ===
    #[serde(rename = "Auth_Signature_Link", default)]
    pub auth_signature_link: String,
    #[serde(rename = "Guest_Signature_Link", default)]
    pub guest_signature_link: String,

    #[serde(rename = "Status", default)]
    pub status: DutySlipStatus,
    /// Optimistic-lock token; stale updates are rejected
    #[serde(rename = "Version", default)]
    pub version: i64,
    /// Server-assigned creation time (Unix millis)
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

/// Create payload: the full field mapping minus everything the server
/// owns (status, version, timestamp, derived totals). Unknown keys in
/// the incoming JSON are ignored, which is the header-set intersection
/// the update contract describes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DutySlipDraft {
    /// Blank or missing means "assign the next number"
    #[serde(rename = "DS_No", default)]
    pub ds_no: Option<String>,
    #[serde(rename = "Organisation", default)]
    pub organisation: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Guest_Mobile", default)]
    pub guest_mobile: String,
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: String,
    #[serde(rename = "Reporting_Time", default)]
    pub reporting_time: String,
    #[serde(rename = "Reporting_Address", default)]
    pub reporting_address: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Vehicle_No", default)]
    pub vehicle_no: String,
    #[serde(rename = "Driver_Name", default)]
    pub driver_name: String,
    #[serde(rename = "Driver_Mobile", default)]
    pub driver_mobile: String,
    #[serde(rename = "Routing", default)]
    pub routing: String,
    #[serde(rename = "Special_Instructions", default)]
    pub special_instructions: String,
    #[serde(rename = "Assignment", default)]
    pub assignment: String,
    #[serde(rename = "Date_Out", default)]
    pub date_out: String,
    #[serde(rename = "Date_In", default)]
    pub date_in: String,
    #[serde(rename = "Driver_Time_Out", default)]
    pub driver_time_out: String,
    #[serde(rename = "Driver_Time_In", default)]
    pub driver_time_in: String,
    #[serde(rename = "Driver_Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_out: Option<Decimal>,
    #[serde(rename = "Driver_Km_In", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_in: Option<Decimal>,
    #[serde(rename = "Time_Out", default)]
    pub time_out: String,
    #[serde(rename = "Time_In", default)]
    pub time_in: String,
    #[serde(rename = "Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub km_out: Option<Decimal>,
    #[serde(rename = "Km_In", default, with = "rust_decimal::serde::float_option")]
    pub km_in: Option<Decimal>,
    /// Resolved URL or inline `data:image/...` payload (stored and
    /// replaced with its URL on save)
    #[serde(rename = "Auth_Signature_Link", default)]
    pub auth_signature_link: String,
    #[serde(rename = "Guest_Signature_Link", default)]
    pub guest_signature_link: String,
}

/// Update payload: partial mapping keyed by `DS_No`. `Status` names the
/// intended transition and `Version` is the optimistic-lock token; both
/// are mandatory. Only keys that are present are written.
#[derive(Debug, Clone, Deserialize)]
pub struct DutySlipPatch {
    #[serde(rename = "DS_No")]
    pub ds_no: String,
    #[serde(rename = "Status")]
    pub status: DutySlipStatus,
    #[serde(rename = "Version")]
    pub version: i64,

    #[serde(rename = "Organisation", default)]
    pub organisation: Option<String>,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: Option<String>,
    #[serde(rename = "Guest_Mobile", default)]
    pub guest_mobile: Option<String>,
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: Option<String>,
    #[serde(rename = "Reporting_Time", default)]
    pub reporting_time: Option<String>,
    #[serde(rename = "Reporting_Address", default)]
    pub reporting_address: Option<String>,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: Option<String>,
    #[serde(rename = "Vehicle_No", default)]
    pub vehicle_no: Option<String>,
    #[serde(rename = "Driver_Name", default)]
    pub driver_name: Option<String>,
    #[serde(rename = "Driver_Mobile", default)]
    pub driver_mobile: Option<String>,
    #[serde(rename = "Routing", default)]
    pub routing: Option<String>,
    #[serde(rename = "Special_Instructions", default)]
    pub special_instructions: Option<String>,
    #[serde(rename = "Assignment", default)]
    pub assignment: Option<String>,
    #[serde(rename = "Date_Out", default)]
    pub date_out: Option<String>,
    #[serde(rename = "Date_In", default)]
    pub date_in: Option<String>,
    #[serde(rename = "Driver_Time_Out", default)]
    pub driver_time_out: Option<String>,
    #[serde(rename = "Driver_Time_In", default)]
    pub driver_time_in: Option<String>,
    #[serde(rename = "Driver_Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_out: Option<Decimal>,
    #[serde(rename = "Driver_Km_In", default, with = "rust_decimal::serde::float_option")]
    pub driver_km_in: Option<Decimal>,
    #[serde(rename = "Time_Out", default)]
    pub time_out: Option<String>,
    #[serde(rename = "Time_In", default)]
    pub time_in: Option<String>,
    #[serde(rename = "Km_Out", default, with = "rust_decimal::serde::float_option")]
    pub km_out: Option<Decimal>,
    #[serde(rename = "Km_In", default, with = "rust_decimal::serde::float_option")]
    pub km_in: Option<Decimal>,
    #[serde(rename = "Auth_Signature_Link", default)]
    pub auth_signature_link: Option<String>,
    #[serde(rename = "Guest_Signature_Link", default)]
    pub guest_signature_link: Option<String>,
}

/// One line of the `getAllDutySlips` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DutySlipSummary {
    #[serde(rename = "DS_No")]
    pub ds_no: String,
    /// The usage-window start date (`Date_Out`)
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Guest_Name")]
    pub guest_name: String,
    #[serde(rename = "Driver_Name")]
    pub driver_name: String,
    #[serde(rename = "Routing")]
    pub routing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for status in [
            DutySlipStatus::New,
            DutySlipStatus::UpdatedByManager,
            DutySlipStatus::ClosedByDriver,
            DutySlipStatus::ClosedByClient,
        ] {
            assert_eq!(status.as_str().parse::<DutySlipStatus>().unwrap(), status);
        }
    }

    #[test]
    fn blank_status_reads_as_new() {
        assert_eq!("".parse::<DutySlipStatus>().unwrap(), DutySlipStatus::New);
    }

    #[test]
    fn free_text_status_is_rejected() {
        assert!("Pending".parse::<DutySlipStatus>().is_err());
    }

    #[test]
    fn patch_tolerates_unknown_keys() {
        let patch: DutySlipPatch = serde_json::from_str(
            r#"{"DS_No":"1001","Status":"Updated by Manager","Version":1,
                "Guest_Name":"A. Rao","Not_A_Header":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(patch.guest_name.as_deref(), Some("A. Rao"));
        assert!(patch.organisation.is_none());
    }

    #[test]
    fn draft_defaults_leave_measurements_blank() {
        let draft: DutySlipDraft =
            serde_json::from_str(r#"{"Guest_Name":"A. Rao"}"#).unwrap();
        assert!(draft.ds_no.is_none());
        assert!(draft.driver_km_out.is_none());
        assert_eq!(draft.driver_time_out, "");
    }
}
