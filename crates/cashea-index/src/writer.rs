//! Index writer: serialize once in memory, then overwrite the target file.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::IndexError;

/// JSON formatting for an index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Compact,
    /// Two-space indentation.
    Pretty,
}

/// The four files the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFile {
    Merchants,
    Stores,
    Orders,
    PaymentsAnalytics,
}

impl IndexFile {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            IndexFile::Merchants => "merchants_index.json",
            IndexFile::Stores => "stores_index.json",
            IndexFile::Orders => "orders_index.json",
            IndexFile::PaymentsAnalytics => "payments_analytics.json",
        }
    }

    #[must_use]
    pub fn layout(self) -> Layout {
        match self {
            IndexFile::PaymentsAnalytics => Layout::Pretty,
            IndexFile::Merchants | IndexFile::Stores | IndexFile::Orders => Layout::Compact,
        }
    }
}

impl std::fmt::Display for IndexFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Serialize `value` and write it to `path`, replacing any previous content.
///
/// The parent directory is created if needed. Serialization finishes before
/// the file is touched, so a serialization failure leaves the old file intact.
///
/// # Errors
///
/// Returns [`IndexError::Serialize`] or [`IndexError::Io`].
pub fn write_index<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    layout: Layout,
) -> Result<(), IndexError> {
    let bytes = match layout {
        Layout::Compact => serde_json::to_vec(value),
        Layout::Pretty => serde_json::to_vec_pretty(value),
    }
    .map_err(|e| IndexError::Serialize {
        path: path.display().to_string(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IndexError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| IndexError::io(path, e))
}

#[cfg(test)]
mod tests {
    use cashea_core::{NamedCount, PaymentsAnalytics, StoreIndexEntry};

    use super::*;

    #[test]
    fn compact_layout_has_no_newlines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(IndexFile::Stores.file_name());
        let entries = vec![StoreIndexEntry {
            id: Some(1),
            method_count: 2,
            types: vec!["MOBILE".to_string()],
        }];
        write_index(&path, &entries, IndexFile::Stores.layout()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, r#"[{"id":1,"methodCount":2,"types":["MOBILE"]}]"#);
    }

    #[test]
    fn pretty_layout_indents_two_spaces() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(IndexFile::PaymentsAnalytics.file_name());
        let analytics = PaymentsAnalytics {
            banks: vec![NamedCount {
                name: "Banesco".to_string(),
                count: 3,
            }],
            ..PaymentsAnalytics::default()
        };
        write_index(&path, &analytics, IndexFile::PaymentsAnalytics.layout()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"banks\": ["), "got: {text}");
        assert!(text.contains("\"paymentTypes\": []"));
    }

    #[test]
    fn overwrites_previous_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("orders_index.json");
        fs::write(&path, "[1,2,3,4,5,6,7,8,9]").unwrap();
        write_index(&path, &Vec::<u8>::new(), Layout::Compact).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn creates_missing_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out").join("stores_index.json");
        write_index(&path, &Vec::<u8>::new(), Layout::Compact).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn null_store_id_is_written_as_null() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stores_index.json");
        let entries = vec![StoreIndexEntry {
            id: None,
            method_count: 0,
            types: vec![],
        }];
        write_index(&path, &entries, Layout::Compact).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, r#"[{"id":null,"methodCount":0,"types":[]}]"#);
    }
}
