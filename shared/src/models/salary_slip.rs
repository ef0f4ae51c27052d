//! Salary Slip Model
//!
//! Simpler lifecycle than a duty slip: drafted by the manager, then
//! approved (with the employee's signature) and finalized, one step at
//! a time in that order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SalarySlipStatus {
    #[default]
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Finalized")]
    Finalized,
}

impl SalarySlipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalarySlipStatus::PendingApproval => "Pending Approval",
            SalarySlipStatus::Approved => "Approved",
            SalarySlipStatus::Finalized => "Finalized",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown salary slip status: {0}")]
pub struct UnknownSalaryStatus(pub String);

impl FromStr for SalarySlipStatus {
    type Err = UnknownSalaryStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "Pending Approval" => Ok(SalarySlipStatus::PendingApproval),
            "Approved" => Ok(SalarySlipStatus::Approved),
            "Finalized" => Ok(SalarySlipStatus::Finalized),
            other => Err(UnknownSalaryStatus(other.to_string())),
        }
    }
}

/// Salary slip entity (工资单)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalarySlip {
    #[serde(rename = "Slip_No")]
    pub slip_no: String,
    #[serde(rename = "Employee_Name", default)]
    pub employee_name: String,
    /// Month being paid, `YYYY-MM`
    #[serde(rename = "Pay_Period", default)]
    pub pay_period: String,
    #[serde(rename = "Basic", default, with = "rust_decimal::serde::float_option")]
    pub basic: Option<Decimal>,
    #[serde(rename = "Allowances", default, with = "rust_decimal::serde::float_option")]
    pub allowances: Option<Decimal>,
    #[serde(rename = "Deductions", default, with = "rust_decimal::serde::float_option")]
    pub deductions: Option<Decimal>,
    /// Server-computed: basic + allowances - deductions
    #[serde(rename = "Net_Pay", with = "rust_decimal::serde::float")]
    pub net_pay: Decimal,
    #[serde(rename = "Employee_Signature_Link", default)]
    pub employee_signature_link: String,
    #[serde(rename = "Status", default)]
    pub status: SalarySlipStatus,
    #[serde(rename = "Version", default)]
    pub version: i64,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

/// Save payload; slips always start in `Pending Approval`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalarySlipDraft {
    #[serde(rename = "Employee_Name", default)]
    pub employee_name: String,
    #[serde(rename = "Pay_Period", default)]
    pub pay_period: String,
    #[serde(rename = "Basic", default, with = "rust_decimal::serde::float_option")]
    pub basic: Option<Decimal>,
    #[serde(rename = "Allowances", default, with = "rust_decimal::serde::float_option")]
    pub allowances: Option<Decimal>,
    #[serde(rename = "Deductions", default, with = "rust_decimal::serde::float_option")]
    pub deductions: Option<Decimal>,
}

/// Update payload: `Status` names the step being taken, `Version` is
/// the optimistic-lock token. The signature link travels with the
/// approval step; pay fields may only change while the slip is still
/// pending.
#[derive(Debug, Clone, Deserialize)]
pub struct SalarySlipPatch {
    #[serde(rename = "Slip_No")]
    pub slip_no: String,
    #[serde(rename = "Status")]
    pub status: SalarySlipStatus,
    #[serde(rename = "Version")]
    pub version: i64,
    #[serde(rename = "Employee_Name", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "Pay_Period", default)]
    pub pay_period: Option<String>,
    #[serde(rename = "Basic", default, with = "rust_decimal::serde::float_option")]
    pub basic: Option<Decimal>,
    #[serde(rename = "Allowances", default, with = "rust_decimal::serde::float_option")]
    pub allowances: Option<Decimal>,
    #[serde(rename = "Deductions", default, with = "rust_decimal::serde::float_option")]
    pub deductions: Option<Decimal>,
    #[serde(rename = "Employee_Signature_Link", default)]
    pub employee_signature_link: Option<String>,
}

/// One line of the `getAllSalarySlips` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalarySlipSummary {
    #[serde(rename = "Slip_No")]
    pub slip_no: String,
    #[serde(rename = "Employee_Name")]
    pub employee_name: String,
    #[serde(rename = "Pay_Period")]
    pub pay_period: String,
    #[serde(rename = "Status")]
    pub status: String,
}
