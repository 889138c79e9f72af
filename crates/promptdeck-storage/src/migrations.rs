//! Schema versioning through a dedicated single-row version table.
//!
//! Each version bump is a const SQL string in `schema.rs`, applied inside a
//! transaction together with the version marker.

use rusqlite::Connection;
use tracing::info;

use promptdeck_core::StorageError;

use crate::errors::{SqliteResultExt, StorageResult};
use crate::schema::{ACCOUNT_TABLES_V1, SCHEMA_VERSION_TABLE};

/// Current schema version. Bump this when adding new migrations.
pub const CURRENT_VERSION: u32 = 1;

/// Schema version recorded in the database, 0 for a fresh file.
pub fn get_schema_version(conn: &Connection) -> StorageResult<u32> {
    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='promptdeck_schema_version'",
            [],
            |row| row.get(0),
        )
        .sqlite()?;
    if !exists {
        return Ok(0);
    }

    match conn.query_row(
        "SELECT version FROM promptdeck_schema_version LIMIT 1",
        [],
        |row| row.get::<_, u32>(0),
    ) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(crate::errors::sqlite_error(e)),
    }
}

fn set_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_VERSION_TABLE)?;
    conn.execute("DELETE FROM promptdeck_schema_version", [])?;
    conn.execute(
        "INSERT INTO promptdeck_schema_version (version) VALUES (?1)",
        rusqlite::params![version],
    )?;
    Ok(())
}

fn apply(conn: &Connection, version: u32, sql: &str) -> StorageResult<()> {
    let run = || -> rusqlite::Result<()> {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        set_schema_version(&tx, version)?;
        tx.commit()
    };
    run().map_err(|e| StorageError::MigrationFailed {
        version,
        message: e.to_string(),
    })
}

/// Run all pending migrations. Returns the version the database ends at.
pub fn migrate(conn: &Connection) -> StorageResult<u32> {
    let current = get_schema_version(conn)?;
    if current >= CURRENT_VERSION {
        return Ok(current);
    }

    if current < 1 {
        info!("Migrating account schema: 0 → 1 (account_kv)");
        apply(conn, 1, ACCOUNT_TABLES_V1)?;
    }

    let final_version = get_schema_version(conn)?;
    info!(from = current, to = final_version, "Account schema migration complete");
    Ok(final_version)
}
