use std::sync::LazyLock;

use cashea_core::StoreIndexEntry;
use regex::Regex;

use crate::error::IndexError;
use crate::reader::StoreDocument;

/// Type recorded for payment methods with no (or an empty) `type`.
const FALLBACK_METHOD_TYPE: &str = "OTRO";

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer regex"));

/// Parse the leading integer of a store file's id text.
///
/// Trailing characters are ignored (`"42abc"` is 42). Text without a
/// leading integer, or one that overflows `i64`, yields `None`.
#[must_use]
pub fn parse_store_id(id_text: &str) -> Option<i64> {
    LEADING_INTEGER
        .captures(id_text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}

/// Summarize each store file's payment methods.
///
/// # Errors
///
/// Returns [`IndexError::UnexpectedShape`] for a store file whose document
/// is not an array of payment methods.
pub fn aggregate_stores(stores: &[StoreDocument]) -> Result<Vec<StoreIndexEntry>, IndexError> {
    stores
        .iter()
        .map(|store| {
            let methods = store
                .methods
                .as_ref()
                .ok_or_else(|| IndexError::UnexpectedShape {
                    path: store.path.display().to_string(),
                    expected: "an array of payment methods",
                })?;

            let mut types: Vec<String> = Vec::new();
            for method in methods {
                let method_type = method
                    .method_type
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or(FALLBACK_METHOD_TYPE);
                if !types.iter().any(|t| t == method_type) {
                    types.push(method_type.to_string());
                }
            }

            Ok(StoreIndexEntry {
                id: parse_store_id(&store.id_text),
                method_count: methods.len(),
                types,
            })
        })
        .collect()
}
