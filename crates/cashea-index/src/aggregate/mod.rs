//! Folds from parsed source documents into index entries.
//!
//! Each aggregator preserves input order and emits one entry per input
//! document; none of them deduplicates or sorts.

mod merchants;
mod orders;
mod payments;
mod stores;

pub use merchants::aggregate_merchants;
pub use orders::aggregate_orders;
pub use payments::{aggregate_payments, BankSmoothing};
pub use stores::{aggregate_stores, parse_store_id};
