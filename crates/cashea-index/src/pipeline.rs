//! One run of each pipeline step: read, aggregate, write.
//!
//! A step whose source directory is missing writes nothing, not even an
//! empty index, and reports [`StepReport::SourceMissing`].

use std::path::{Path, PathBuf};

use cashea_core::{AppConfig, RegionCatalog};
use rand::Rng;

use crate::aggregate::{
    aggregate_merchants, aggregate_orders, aggregate_payments, aggregate_stores, BankSmoothing,
};
use crate::error::IndexError;
use crate::reader::{
    read_client_orders, read_merchant_documents, read_store_documents, FileOutcome,
};
use crate::writer::{write_index, IndexFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    Written {
        file: IndexFile,
        path: PathBuf,
        records: usize,
        /// Source files left out because they failed to parse.
        skipped_files: usize,
    },
    SourceMissing {
        file: IndexFile,
        dir: PathBuf,
    },
}

impl StepReport {
    #[must_use]
    pub fn file(&self) -> IndexFile {
        match self {
            StepReport::Written { file, .. } | StepReport::SourceMissing { file, .. } => *file,
        }
    }
}

fn source_missing(file: IndexFile, dir: &Path) -> StepReport {
    tracing::info!(file = %file, dir = %dir.display(), "source directory missing; skipping");
    StepReport::SourceMissing {
        file,
        dir: dir.to_path_buf(),
    }
}

fn written(file: IndexFile, path: PathBuf, records: usize, skipped_files: usize) -> StepReport {
    tracing::info!(file = %file, path = %path.display(), records, skipped_files, "index written");
    StepReport::Written {
        file,
        path,
        records,
        skipped_files,
    }
}

/// Build `merchants_index.json`, geocoding stores against `catalog`.
///
/// # Errors
///
/// Returns [`IndexError`] if any merchant file is unreadable or malformed,
/// or the index cannot be written.
pub fn run_merchants_index(
    config: &AppConfig,
    catalog: &RegionCatalog,
) -> Result<StepReport, IndexError> {
    let file = IndexFile::Merchants;
    let Some(docs) = read_merchant_documents(&config.merchants_dir)? else {
        return Ok(source_missing(file, &config.merchants_dir));
    };

    let entries = aggregate_merchants(docs, catalog);
    let path = config.output_dir.join(file.file_name());
    write_index(&path, &entries, file.layout())?;
    Ok(written(file, path, entries.len(), 0))
}

/// Build `stores_index.json`.
///
/// # Errors
///
/// Returns [`IndexError`] if any store file is unreadable, malformed, or not
/// an array, or the index cannot be written.
pub fn run_stores_index(config: &AppConfig) -> Result<StepReport, IndexError> {
    let file = IndexFile::Stores;
    let Some(docs) = read_store_documents(&config.stores_dir)? else {
        return Ok(source_missing(file, &config.stores_dir));
    };

    let entries = aggregate_stores(&docs)?;
    let path = config.output_dir.join(file.file_name());
    write_index(&path, &entries, file.layout())?;
    Ok(written(file, path, entries.len(), 0))
}

/// Build `orders_index.json`. Client files that fail to parse are logged
/// and left out.
///
/// # Errors
///
/// Returns [`IndexError`] only if the client directory cannot be listed or
/// the index cannot be written.
pub fn run_orders_index(config: &AppConfig) -> Result<StepReport, IndexError> {
    let file = IndexFile::Orders;
    let Some(outcomes) = read_client_orders(&config.clients_dir)? else {
        return Ok(source_missing(file, &config.clients_dir));
    };

    let mut orders = Vec::with_capacity(outcomes.len());
    let mut skipped = 0usize;
    for outcome in outcomes {
        match outcome {
            FileOutcome::Parsed(order) => orders.push(order),
            FileOutcome::Skipped { path, reason } => {
                tracing::warn!(path = %path.display(), %reason, "skipping client file");
                skipped += 1;
            }
        }
    }

    let entries = aggregate_orders(orders);
    let path = config.output_dir.join(file.file_name());
    write_index(&path, &entries, file.layout())?;
    Ok(written(file, path, entries.len(), skipped))
}

/// Build `payments_analytics.json` from the store payment methods.
///
/// `records` in the report is the number of store files tallied.
///
/// # Errors
///
/// Returns [`IndexError`] if any store file is unreadable or malformed, or
/// the file cannot be written.
pub fn run_payments_analytics<R: Rng>(
    config: &AppConfig,
    smoothing: &BankSmoothing,
    rng: &mut R,
) -> Result<StepReport, IndexError> {
    let file = IndexFile::PaymentsAnalytics;
    let Some(docs) = read_store_documents(&config.stores_dir)? else {
        return Ok(source_missing(file, &config.stores_dir));
    };

    let analytics = aggregate_payments(&docs, smoothing, rng);
    let path = config.output_dir.join(file.file_name());
    write_index(&path, &analytics, file.layout())?;
    Ok(written(file, path, docs.len(), 0))
}
