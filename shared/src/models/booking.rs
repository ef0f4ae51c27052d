//! Booking Model
//!
//! Thin sheet resource: save + list only. A booking is the customer's
//! request before a duty slip exists; duty slips reference it through
//! `Booking_ID`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    /// `BK-<n>`, assigned when the payload leaves it blank
    #[serde(rename = "Booking_ID")]
    pub booking_id: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Guest_Mobile", default)]
    pub guest_mobile: String,
    #[serde(rename = "Pickup_Date", default)]
    pub pickup_date: String,
    #[serde(rename = "Pickup_Address", default)]
    pub pickup_address: String,
    #[serde(rename = "Drop_Address", default)]
    pub drop_address: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingDraft {
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: Option<String>,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Guest_Mobile", default)]
    pub guest_mobile: String,
    #[serde(rename = "Pickup_Date", default)]
    pub pickup_date: String,
    #[serde(rename = "Pickup_Address", default)]
    pub pickup_address: String,
    #[serde(rename = "Drop_Address", default)]
    pub drop_address: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}
