//! Compact index entries written to the `*_index.json` files.
//!
//! Passthrough fields that were absent in the source document are omitted
//! from the output rather than written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantIndexEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub merchant_type: Option<String>,
    /// State of the first located store.
    pub state: String,
    pub locations: Vec<StoreLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreIndexEntry {
    /// Parsed from the file name; `None` (written as `null`) when it holds
    /// no leading integer.
    pub id: Option<i64>,
    pub method_count: usize,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIndexEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_number: Option<i64>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub customer_name: Option<String>,
    pub created_at: Option<String>,
}

impl OrderIndexEntry {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some("CANCELLED")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsAnalytics {
    pub banks: Vec<NamedCount>,
    pub currencies: Vec<NamedCount>,
    pub payment_types: Vec<NamedCount>,
}
