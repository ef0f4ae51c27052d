//! Financial Entry Model
//!
//! One credit or debit line in the transaction tracker. Categorisation
//! is validated against the directory's account tree at the write
//! boundary, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryType {
    #[serde(rename = "Credit")]
    Credit,
    #[serde(rename = "Debit")]
    Debit,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Credit => "Credit",
            EntryType::Debit => "Debit",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown entry type: {0}")]
pub struct UnknownEntryType(pub String);

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" => Ok(EntryType::Credit),
            "Debit" => Ok(EntryType::Debit),
            other => Err(UnknownEntryType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialEntry {
    /// `FE-<n>`, assigned when the payload leaves it blank
    #[serde(rename = "Entry_ID")]
    pub entry_id: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(rename = "Account", default)]
    pub account: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Subcategory", default)]
    pub subcategory: String,
    #[serde(rename = "Amount", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialEntryDraft {
    #[serde(rename = "Entry_ID", default)]
    pub entry_id: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(rename = "Account", default)]
    pub account: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Subcategory", default)]
    pub subcategory: String,
    #[serde(rename = "Amount", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}
