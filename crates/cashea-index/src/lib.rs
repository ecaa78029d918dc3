pub mod aggregate;
pub mod cache;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use aggregate::{
    aggregate_merchants, aggregate_orders, aggregate_payments, aggregate_stores, BankSmoothing,
};
pub use cache::IndexCache;
pub use error::IndexError;
pub use pipeline::{
    run_merchants_index, run_orders_index, run_payments_analytics, run_stores_index, StepReport,
};
pub use reader::{
    read_client_orders, read_merchant_documents, read_store_documents, FileOutcome,
    StoreDocument,
};
pub use writer::{write_index, IndexFile, Layout};
