//! Source documents as they sit on disk, one JSON document per file.
//!
//! Only the fields the index pipeline reads are modelled; everything else in
//! the documents is ignored on deserialization. Every field goes through a
//! [`crate::lenient`] projection, so a document that is valid JSON always
//! deserializes, whatever its field types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A merchant document from `SAMPLE_MERCHANTS/<id>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MerchantDocument {
    #[serde(deserialize_with = "crate::lenient::passthrough")]
    pub id: Option<Value>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", deserialize_with = "crate::lenient::text")]
    pub merchant_type: Option<String>,
    #[serde(deserialize_with = "crate::lenient::items")]
    pub stores: Option<Vec<MerchantStore>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MerchantStore {
    #[serde(deserialize_with = "crate::lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::object")]
    pub address: Option<StoreAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreAddress {
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
    /// Numeric strings are coerced; values that do not coerce are `None`.
    #[serde(deserialize_with = "crate::lenient::number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub long: Option<f64>,
}

impl StoreAddress {
    /// `(lat, lng)` when both are present and non-zero.
    ///
    /// Zero is treated as missing, so a store sitting exactly on the equator
    /// or the prime meridian has no usable coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(lng)) if is_truthy(lat) && is_truthy(lng) => Some((lat, lng)),
            _ => None,
        }
    }
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// One entry of a `SAMPLE_STORE/store_<id>.json` payment-method array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(deserialize_with = "crate::lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "crate::lenient::text")]
    pub method_type: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub bank_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::object")]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    #[serde(deserialize_with = "crate::lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
}

/// A client order from `SAMPLE_CLIENT/<identifier>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOrder {
    /// Kept verbatim: string in most exports, a number in some.
    #[serde(deserialize_with = "crate::lenient::passthrough")]
    pub id: Option<Value>,
    #[serde(deserialize_with = "crate::lenient::integer")]
    pub identifier_number: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub channel: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "crate::lenient::object")]
    pub payment_details: Option<PaymentDetails>,
}

impl ClientOrder {
    /// Customer name from the nested payment details, if non-empty.
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        self.payment_details
            .as_ref()
            .and_then(|d| d.user.as_ref())
            .and_then(|u| u.full_name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentDetails {
    #[serde(deserialize_with = "crate::lenient::object")]
    pub user: Option<PaymentUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentUser {
    #[serde(deserialize_with = "crate::lenient::text")]
    pub identification_number: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::text")]
    pub phone_number: Option<String>,
}
