//! # promptdeck-storage
//!
//! SQLite-backed `AccountStore` for promptdeck.
//!
//! One writer connection plus a small read pool over a single WAL database.
//! Every surface of the extension opens the same file; `detect_external_changes`
//! tells a surface which of the shared keys another surface rewrote since it
//! last looked.

pub mod errors;
pub mod migrations;
pub mod pool;
pub mod pragmas;
pub mod schema;
pub mod store;

pub use errors::StorageResult;
pub use migrations::{get_schema_version, migrate, CURRENT_VERSION};
pub use pool::ConnectionPool;
pub use pragmas::{configure_connection, configure_readonly_connection};
pub use store::SqliteAccountStore;
