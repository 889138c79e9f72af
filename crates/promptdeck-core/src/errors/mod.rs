//! Error types, one enum per subsystem, all converting into `EntitlementError`.

mod auth_error;
mod config_error;
mod entitlement_error;
pub mod error_code;
mod storage_error;
mod warning;

pub use auth_error::AuthError;
pub use config_error::ConfigError;
pub use entitlement_error::{EntitlementError, EntitlementResult};
pub use storage_error::StorageError;
pub use warning::EntitlementWarning;
