//! Entity readers: enumerate a source directory and parse one document per file.
//!
//! Every reader returns `Ok(None)` when its directory does not exist, which the
//! pipeline treats as "nothing to do" for that entity class. Files are visited
//! in file-name order and read one at a time.
//!
//! Merchant and store files are all-or-nothing: the first unreadable file or
//! file that is not valid JSON aborts with an [`IndexError`]. Client files are
//! isolated: each one yields a [`FileOutcome`] and a bad file never stops the
//! scan. Field types never fail a read; documents are projected through
//! [`cashea_core::lenient`].

use std::fs;
use std::path::{Path, PathBuf};

use cashea_core::lenient;
use cashea_core::{ClientOrder, MerchantDocument, PaymentMethod};
use serde_json::Value;

use crate::error::IndexError;

const STORE_PREFIX: &str = "store_";
const JSON_SUFFIX: &str = ".json";

/// Result of reading one client file.
#[derive(Debug)]
pub enum FileOutcome<T> {
    Parsed(T),
    Skipped { path: PathBuf, reason: String },
}

impl<T> FileOutcome<T> {
    #[must_use]
    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Skipped { .. } => None,
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// A store payment-method file.
#[derive(Debug, Clone)]
pub struct StoreDocument {
    pub path: PathBuf,
    /// The part of the file name between `store_` and `.json`.
    pub id_text: String,
    /// `None` when the document's top-level value is not an array.
    pub methods: Option<Vec<PaymentMethod>>,
}

/// List regular files in `dir` whose name passes `accept`, sorted by name.
fn list_files<F>(dir: &Path, accept: F) -> Result<Option<Vec<PathBuf>>, IndexError>
where
    F: Fn(&str) -> bool,
{
    if !dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(dir).map_err(|e| IndexError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IndexError::io(dir, e))?;
        let path = entry.path();
        let accepted = entry.file_name().to_str().is_some_and(&accept);
        if accepted && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(Some(files))
}

/// Read and parse one file. Only unreadable files and invalid JSON fail.
fn read_value(path: &Path) -> Result<Value, IndexError> {
    tracing::debug!(path = %path.display(), "reading source document");
    let bytes = fs::read(path).map_err(|e| IndexError::io(path, e))?;
    serde_json::from_slice::<Value>(&bytes).map_err(|e| IndexError::parse(path, e))
}

/// Read every `*.json` merchant document in `dir`.
///
/// # Errors
///
/// Returns [`IndexError`] on the first file that cannot be read or is not
/// valid JSON.
pub fn read_merchant_documents(dir: &Path) -> Result<Option<Vec<MerchantDocument>>, IndexError> {
    let Some(files) = list_files(dir, |name| name.ends_with(JSON_SUFFIX))? else {
        return Ok(None);
    };

    files
        .iter()
        .map(|path| read_value(path).map(lenient::document::<MerchantDocument>))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Read every `store_<id>.json` document in `dir`.
///
/// # Errors
///
/// Returns [`IndexError`] on the first file that cannot be read or is not
/// valid JSON.
pub fn read_store_documents(dir: &Path) -> Result<Option<Vec<StoreDocument>>, IndexError> {
    let Some(files) = list_files(dir, |name| {
        name.starts_with(STORE_PREFIX) && name.ends_with(JSON_SUFFIX)
    })?
    else {
        return Ok(None);
    };

    files
        .into_iter()
        .map(|path| {
            let methods = match read_value(&path)? {
                Value::Array(values) => Some(
                    values
                        .into_iter()
                        .map(lenient::document::<PaymentMethod>)
                        .collect(),
                ),
                _ => None,
            };
            let id_text = store_id_text(&path);
            Ok(StoreDocument {
                path,
                id_text,
                methods,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn store_id_text(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| {
            let rest = n.strip_prefix(STORE_PREFIX).unwrap_or(n);
            rest.strip_suffix(JSON_SUFFIX).unwrap_or(rest).to_string()
        })
        .unwrap_or_default()
}

/// Read every `*.json` client order in `dir`, isolating per-file failures.
///
/// # Errors
///
/// Returns [`IndexError`] only when the directory itself cannot be listed.
pub fn read_client_orders(
    dir: &Path,
) -> Result<Option<Vec<FileOutcome<ClientOrder>>>, IndexError> {
    let Some(files) = list_files(dir, |name| name.ends_with(JSON_SUFFIX))? else {
        return Ok(None);
    };

    let outcomes = files
        .into_iter()
        .map(|path| match read_client_order(&path) {
            Ok(order) => FileOutcome::Parsed(order),
            Err(e) => FileOutcome::Skipped {
                reason: e.to_string(),
                path,
            },
        })
        .collect();
    Ok(Some(outcomes))
}

fn read_client_order(path: &Path) -> Result<ClientOrder, IndexError> {
    read_value(path).map(lenient::document)
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
