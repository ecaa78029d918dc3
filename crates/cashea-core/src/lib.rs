pub mod app_config;
pub mod config;
pub mod geo;
pub mod index;
pub mod lenient;
pub mod records;

pub use app_config::{AppConfig, BankSmoothingConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Region, RegionCatalog, OTHER_STATE, UNKNOWN_STATE};
pub use index::{
    MerchantIndexEntry, NamedCount, OrderIndexEntry, PaymentsAnalytics, StoreIndexEntry,
    StoreLocation,
};
pub use records::{
    ClientOrder, Currency, MerchantDocument, MerchantStore, PaymentDetails, PaymentMethod,
    PaymentUser, StoreAddress,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
