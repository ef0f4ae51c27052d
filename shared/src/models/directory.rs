//! Directory Model
//!
//! Injected lookup data: driver roster, vehicle types and the
//! account/category tree the financial tracker validates against.
//! Loaded once at startup from a JSON file and passed through state,
//! never read from a module global.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DriverEntry {
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CategoryNode {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AccountNode {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Directory {
    #[serde(default)]
    pub drivers: Vec<DriverEntry>,
    #[serde(default)]
    pub vehicle_types: Vec<String>,
    #[serde(default)]
    pub accounts: Vec<AccountNode>,
}

impl Directory {
    /// Exact-name driver lookup, whitespace-insensitive
    pub fn driver(&self, name: &str) -> Option<&DriverEntry> {
        let wanted = name.trim();
        self.drivers.iter().find(|d| d.name == wanted)
    }

    pub fn account(&self, name: &str) -> Option<&AccountNode> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// No account tree configured means category checks are skipped
    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }
}

impl AccountNode {
    pub fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.name == name)
    }
}

impl CategoryNode {
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }
}
