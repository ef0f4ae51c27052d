//! Review Model
//!
//! Guest feedback rows. Save + list only; the rating is checked against
//! the 1..=5 scale at the write boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    /// `RV-<n>`, assigned when the payload leaves it blank
    #[serde(rename = "Review_ID")]
    pub review_id: String,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    /// 1..=5
    #[serde(rename = "Rating", default)]
    pub rating: i64,
    #[serde(rename = "Comments", default)]
    pub comments: String,
    #[serde(rename = "Trip_Date", default)]
    pub trip_date: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    #[serde(rename = "Review_ID", default)]
    pub review_id: Option<String>,
    #[serde(rename = "Guest_Name", default)]
    pub guest_name: String,
    #[serde(rename = "Rating", default)]
    pub rating: i64,
    #[serde(rename = "Comments", default)]
    pub comments: String,
    #[serde(rename = "Trip_Date", default)]
    pub trip_date: String,
}
