//! Route Model
//!
//! Reference routes the office quotes from. Save + list only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// `RT-<n>`, assigned when the payload leaves it blank
    #[serde(rename = "Route_ID")]
    pub route_id: String,
    #[serde(rename = "Route_Name", default)]
    pub route_name: String,
    #[serde(rename = "Origin", default)]
    pub origin: String,
    #[serde(rename = "Destination", default)]
    pub destination: String,
    #[serde(rename = "Distance_Kms", default, with = "rust_decimal::serde::float_option")]
    pub distance_kms: Option<Decimal>,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteDraft {
    #[serde(rename = "Route_ID", default)]
    pub route_id: Option<String>,
    #[serde(rename = "Route_Name", default)]
    pub route_name: String,
    #[serde(rename = "Origin", default)]
    pub origin: String,
    #[serde(rename = "Destination", default)]
    pub destination: String,
    #[serde(rename = "Distance_Kms", default, with = "rust_decimal::serde::float_option")]
    pub distance_kms: Option<Decimal>,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}
