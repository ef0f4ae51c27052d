//! Invoice Model
//!
//! Derived from a closed duty trip. Identified two ways: `Invoice_ID`
//! (`ST-` + booking id, human-facing) and `Public_ID` (random UUID used
//! in shareable links so invoice numbers cannot be enumerated).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice entity (账单)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    #[serde(rename = "Invoice_ID")]
    pub invoice_id: String,
    #[serde(rename = "Public_ID")]
    pub public_id: String,
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Vehicle_No", default)]
    pub vehicle_no: String,
    #[serde(rename = "Trip_Start_Date", default)]
    pub trip_start_date: String,
    #[serde(rename = "Trip_End_Date", default)]
    pub trip_end_date: String,
    /// As carried over from the slip, e.g. `"8 hrs 0 mins"`
    #[serde(rename = "Total_Hours", default)]
    pub total_hours: String,
    #[serde(rename = "Total_Kms", default, with = "rust_decimal::serde::float_option")]
    pub total_kms: Option<Decimal>,
    /// 12-hour billing blocks, at least 1 once any time was logged
    #[serde(rename = "Billing_Slabs", default)]
    pub billing_slabs: i64,

    // === Rate card inputs ===
    #[serde(rename = "Base_Rate", default, with = "rust_decimal::serde::float_option")]
    pub base_rate: Option<Decimal>,
    #[serde(rename = "Included_Kms_Per_Slab", default, with = "rust_decimal::serde::float_option")]
    pub included_kms_per_slab: Option<Decimal>,
    #[serde(rename = "Extra_Km_Rate", default, with = "rust_decimal::serde::float_option")]
    pub extra_km_rate: Option<Decimal>,
    #[serde(rename = "Batta_Rate", default, with = "rust_decimal::serde::float_option")]
    pub batta_rate: Option<Decimal>,
    #[serde(rename = "Tolls", default, with = "rust_decimal::serde::float_option")]
    pub tolls: Option<Decimal>,
    #[serde(rename = "Permits", default, with = "rust_decimal::serde::float_option")]
    pub permits: Option<Decimal>,

    // === Computed breakdown ===
    #[serde(rename = "Package_Cost", default, with = "rust_decimal::serde::float_option")]
    pub package_cost: Option<Decimal>,
    #[serde(rename = "Extra_Kms", default, with = "rust_decimal::serde::float_option")]
    pub extra_kms: Option<Decimal>,
    #[serde(rename = "Extra_Km_Cost", default, with = "rust_decimal::serde::float_option")]
    pub extra_km_cost: Option<Decimal>,
    #[serde(rename = "Batta_Cost", default, with = "rust_decimal::serde::float_option")]
    pub batta_cost: Option<Decimal>,
    #[serde(rename = "Grand_Total", with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,

    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

/// Hours as submitted by the billing form. Older pages send the slip's
/// formatted text, newer ones a bare decimal-hours number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HoursField {
    Number(f64),
    Text(String),
}

impl HoursField {
    /// Text form for storage; numbers render with plain `Display`
    pub fn as_text(&self) -> String {
        match self {
            HoursField::Number(n) => n.to_string(),
            HoursField::Text(s) => s.clone(),
        }
    }
}

impl Default for HoursField {
    fn default() -> Self {
        HoursField::Text(String::new())
    }
}

/// Save payload. The server recomputes slabs and the cost breakdown
/// from these inputs; any client-side arithmetic in the payload is
/// discarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceDraft {
    #[serde(rename = "Booking_ID", default)]
    pub booking_id: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: String,
    #[serde(rename = "Vehicle_No", default)]
    pub vehicle_no: String,
    #[serde(rename = "Trip_Start_Date", default)]
    pub trip_start_date: String,
    #[serde(rename = "Trip_End_Date", default)]
    pub trip_end_date: String,
    #[serde(rename = "Total_Hours", default)]
    pub total_hours: HoursField,
    #[serde(rename = "Total_Kms", default, with = "rust_decimal::serde::float_option")]
    pub total_kms: Option<Decimal>,
    #[serde(rename = "Base_Rate", default, with = "rust_decimal::serde::float_option")]
    pub base_rate: Option<Decimal>,
    #[serde(rename = "Included_Kms_Per_Slab", default, with = "rust_decimal::serde::float_option")]
    pub included_kms_per_slab: Option<Decimal>,
    #[serde(rename = "Extra_Km_Rate", default, with = "rust_decimal::serde::float_option")]
    pub extra_km_rate: Option<Decimal>,
    #[serde(rename = "Batta_Rate", default, with = "rust_decimal::serde::float_option")]
    pub batta_rate: Option<Decimal>,
    #[serde(rename = "Tolls", default, with = "rust_decimal::serde::float_option")]
    pub tolls: Option<Decimal>,
    #[serde(rename = "Permits", default, with = "rust_decimal::serde::float_option")]
    pub permits: Option<Decimal>,
}

/// One line of the `getAllInvoices` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSummary {
    #[serde(rename = "Invoice_ID")]
    pub invoice_id: String,
    #[serde(rename = "Public_ID")]
    pub public_id: String,
    #[serde(rename = "Booking_ID")]
    pub booking_id: String,
    #[serde(rename = "Guest_Name")]
    pub guest_name: String,
    #[serde(rename = "Trip_Start_Date")]
    pub trip_start_date: String,
    #[serde(rename = "Grand_Total", with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    #[serde(rename = "Status")]
    pub status: String,
}
