//! Per-session memo of parsed JSON documents under a site root.
//!
//! An [`IndexCache`] is an ordinary value: whoever creates it decides how
//! long cached documents live. Nothing is shared between caches, and a
//! regenerated file is only seen after [`IndexCache::invalidate`] or
//! [`IndexCache::clear`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cashea_core::{
    ClientOrder, MerchantDocument, MerchantIndexEntry, OrderIndexEntry, PaymentMethod,
    PaymentsAnalytics, StoreIndexEntry,
};
use serde::de::DeserializeOwned;

use crate::error::IndexError;
use crate::writer::IndexFile;

#[derive(Debug)]
pub struct IndexCache {
    root: PathBuf,
    documents: HashMap<PathBuf, serde_json::Value>,
}

impl IndexCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            documents: HashMap::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and deserialize `relative` (a path under the root).
    ///
    /// The parsed JSON is kept after the first successful read; failed reads
    /// are not remembered, so a later call retries.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file cannot be read and
    /// [`IndexError::Parse`] if it is not JSON or does not match `T`.
    pub fn load<T: DeserializeOwned>(
        &mut self,
        relative: impl AsRef<Path>,
    ) -> Result<T, IndexError> {
        let relative = relative.as_ref();
        let value = match self.documents.entry(relative.to_path_buf()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let path = self.root.join(relative);
                tracing::debug!(path = %path.display(), "loading document into cache");
                let bytes = fs::read(&path).map_err(|e| IndexError::io(&path, e))?;
                let parsed: serde_json::Value =
                    serde_json::from_slice(&bytes).map_err(|e| IndexError::parse(&path, e))?;
                entry.insert(parsed)
            }
        };
        T::deserialize(&*value).map_err(|e| IndexError::parse(&self.root.join(relative), e))
    }

    /// Drop one cached document. Returns whether it was cached.
    pub fn invalidate(&mut self, relative: impl AsRef<Path>) -> bool {
        self.documents.remove(relative.as_ref()).is_some()
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn merchants_index(&mut self) -> Result<Vec<MerchantIndexEntry>, IndexError> {
        self.load(IndexFile::Merchants.file_name())
    }

    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn stores_index(&mut self) -> Result<Vec<StoreIndexEntry>, IndexError> {
        self.load(IndexFile::Stores.file_name())
    }

    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn orders_index(&mut self) -> Result<Vec<OrderIndexEntry>, IndexError> {
        self.load(IndexFile::Orders.file_name())
    }

    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn payments_analytics(&mut self) -> Result<PaymentsAnalytics, IndexError> {
        self.load(IndexFile::PaymentsAnalytics.file_name())
    }

    /// Full merchant document from `SAMPLE_MERCHANTS/<id>.json`.
    ///
    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn merchant(&mut self, id: i64) -> Result<MerchantDocument, IndexError> {
        self.load(Path::new("SAMPLE_MERCHANTS").join(format!("{id}.json")))
    }

    /// Payment methods from `SAMPLE_STORE/store_<id>.json`.
    ///
    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn store(&mut self, id: i64) -> Result<Vec<PaymentMethod>, IndexError> {
        self.load(Path::new("SAMPLE_STORE").join(format!("store_{id}.json")))
    }

    /// Client order from `SAMPLE_CLIENT/<identifier>.json`.
    ///
    /// # Errors
    ///
    /// See [`IndexCache::load`].
    pub fn client(&mut self, identifier_number: i64) -> Result<ClientOrder, IndexError> {
        self.load(Path::new("SAMPLE_CLIENT").join(format!("{identifier_number}.json")))
    }
}
