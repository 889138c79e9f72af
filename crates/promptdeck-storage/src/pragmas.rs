//! SQLite PRAGMA configuration. Called on every connection right after opening.

use rusqlite::Connection;

use crate::errors::{SqliteResultExt, StorageResult};

const BASE_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
    PRAGMA cache_size = -2000;
    PRAGMA temp_store = MEMORY;
";

/// Writer connection: WAL, NORMAL sync, 5s busy timeout.
///
/// Several extension surfaces write the same file, so `busy_timeout` is the
/// main concurrency mechanism.
pub fn configure_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(BASE_PRAGMAS).sqlite()
}

/// Reader connection: same PRAGMAs plus `query_only`.
pub fn configure_readonly_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(BASE_PRAGMAS).sqlite()?;
    conn.execute_batch("PRAGMA query_only = ON;").sqlite()
}
