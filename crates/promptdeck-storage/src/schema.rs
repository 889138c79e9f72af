//! Schema SQL constants.

/// V1: one row per shared key.
///
/// `value` is the JSON document, `NULL` once the key is removed. The row is
/// kept as a tombstone so `revision` only ever grows, which is what change
/// detection diffs against.
pub const ACCOUNT_TABLES_V1: &str = "
    CREATE TABLE IF NOT EXISTS account_kv (
        key TEXT PRIMARY KEY,
        value TEXT,
        revision INTEGER NOT NULL DEFAULT 1,
        updated_at INTEGER NOT NULL DEFAULT (unixepoch())
    ) STRICT;
";

/// Single-row version marker.
pub const SCHEMA_VERSION_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS promptdeck_schema_version (
        version INTEGER NOT NULL
    ) STRICT;
";
