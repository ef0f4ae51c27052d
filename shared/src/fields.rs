//! Sheet Header Tables
//!
//! Single source of truth for the column names. Serde renames on the
//! models must stay in lockstep with these consts; the coverage test at
//! the bottom fails if either side drifts. Validation messages and the
//! close masks reference the consts so a header rename happens in one
//! place.

pub const DS_NO: &str = "DS_No";
pub const ORGANISATION: &str = "Organisation";
pub const GUEST_NAME: &str = "Guest_Name";
pub const GUEST_MOBILE: &str = "Guest_Mobile";
pub const BOOKING_ID: &str = "Booking_ID";
pub const REPORTING_TIME: &str = "Reporting_Time";
pub const REPORTING_ADDRESS: &str = "Reporting_Address";
pub const VEHICLE_TYPE: &str = "Vehicle_Type";
pub const VEHICLE_NO: &str = "Vehicle_No";
pub const DRIVER_NAME: &str = "Driver_Name";
pub const DRIVER_MOBILE: &str = "Driver_Mobile";
pub const ROUTING: &str = "Routing";
pub const SPECIAL_INSTRUCTIONS: &str = "Special_Instructions";
pub const ASSIGNMENT: &str = "Assignment";
pub const DATE_OUT: &str = "Date_Out";
pub const DATE_IN: &str = "Date_In";
pub const TOTAL_DAYS: &str = "Total_Days";
pub const DRIVER_TIME_OUT: &str = "Driver_Time_Out";
pub const DRIVER_TIME_IN: &str = "Driver_Time_In";
pub const DRIVER_KM_OUT: &str = "Driver_Km_Out";
pub const DRIVER_KM_IN: &str = "Driver_Km_In";
pub const TIME_OUT: &str = "Time_Out";
pub const TIME_IN: &str = "Time_In";
pub const KM_OUT: &str = "Km_Out";
pub const KM_IN: &str = "Km_In";
pub const DRIVER_TOTAL_HRS: &str = "Driver_Total_Hrs";
pub const DRIVER_TOTAL_KMS: &str = "Driver_Total_Kms";
pub const AUTH_SIGNATURE_LINK: &str = "Auth_Signature_Link";
pub const GUEST_SIGNATURE_LINK: &str = "Guest_Signature_Link";
pub const STATUS: &str = "Status";
pub const VERSION: &str = "Version";
pub const TIMESTAMP: &str = "Timestamp";

/// Every duty-slip column, in sheet order
pub const DUTY_SLIP_HEADERS: &[&str] = &[
    DS_NO,
    ORGANISATION,
    GUEST_NAME,
    GUEST_MOBILE,
    BOOKING_ID,
    REPORTING_TIME,
    REPORTING_ADDRESS,
    VEHICLE_TYPE,
    VEHICLE_NO,
    DRIVER_NAME,
    DRIVER_MOBILE,
    ROUTING,
    SPECIAL_INSTRUCTIONS,
    ASSIGNMENT,
    DATE_OUT,
    DATE_IN,
    TOTAL_DAYS,
    DRIVER_TIME_OUT,
    DRIVER_TIME_IN,
    DRIVER_KM_OUT,
    DRIVER_KM_IN,
    TIME_OUT,
    TIME_IN,
    KM_OUT,
    KM_IN,
    DRIVER_TOTAL_HRS,
    DRIVER_TOTAL_KMS,
    AUTH_SIGNATURE_LINK,
    GUEST_SIGNATURE_LINK,
    STATUS,
    VERSION,
    TIMESTAMP,
];

/// Fields a driver close may write. Everything else in the payload is
/// dropped before the write.
pub const DRIVER_CLOSE_FIELDS: &[&str] =
    &[DRIVER_TIME_IN, DRIVER_KM_IN, TIME_IN, KM_IN, GUEST_SIGNATURE_LINK];

/// Fields a client close may write
pub const CLIENT_CLOSE_FIELDS: &[&str] = &[TIME_IN, KM_IN, GUEST_SIGNATURE_LINK];
