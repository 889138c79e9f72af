//! ConnectionPool: one writer plus round-robin readers.
//!
//! The only place in this crate that holds `Mutex<Connection>`.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use promptdeck_core::StorageError;

use crate::errors::{SqliteResultExt, StorageResult};
use crate::{migrations, pragmas};

const DEFAULT_READ_POOL_SIZE: usize = 2;

/// Connection pool for the account database: 1 writer + N readers.
pub struct ConnectionPool {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl ConnectionPool {
    /// Open a file-backed pool and run pending migrations on the writer.
    ///
    /// Readers are opened after migrating so they see the schema. A
    /// `read_pool_size` of 0 means the default.
    pub fn open(path: &Path, read_pool_size: usize) -> StorageResult<Self> {
        let pool_size = if read_pool_size == 0 {
            DEFAULT_READ_POOL_SIZE
        } else {
            read_pool_size
        };

        let writer = Connection::open(path).sqlite()?;
        pragmas::configure_connection(&writer)?;
        migrations::migrate(&writer)?;

        let mut readers = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .sqlite()?;
            pragmas::configure_readonly_connection(&reader)?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        })
    }

    /// Single in-memory connection; reads go through the writer.
    pub fn open_in_memory() -> StorageResult<Self> {
        let writer = Connection::open_in_memory().sqlite()?;
        pragmas::configure_connection(&writer)?;
        migrations::migrate(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        })
    }

    pub fn with_writer<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let conn = self.writer.lock().map_err(|e| StorageError::LockPoisoned {
            context: format!("writer: {e}"),
        })?;
        f(&conn)
    }

    /// Falls back to the writer when there are no readers (in-memory mode).
    pub fn with_reader<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }

        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .map_err(|e| StorageError::LockPoisoned {
                context: format!("reader {index}: {e}"),
            })?;
        f(&conn)
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    pub fn is_wal_mode(&self) -> bool {
        self.with_writer(|conn| {
            let mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_default();
            Ok(mode.eq_ignore_ascii_case("wal"))
        })
        .unwrap_or(false)
    }
}
