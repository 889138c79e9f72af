//! rusqlite → `StorageError` conversion.
//!
//! `StorageError` lives in promptdeck-core, which does not link SQLite, so the
//! conversion is an extension trait here rather than a `From` impl.

use promptdeck_core::StorageError;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

pub fn sqlite_error(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}

/// `.sqlite()?` on any rusqlite result.
pub trait SqliteResultExt<T> {
    fn sqlite(self) -> StorageResult<T>;
}

impl<T> SqliteResultExt<T> for Result<T, rusqlite::Error> {
    fn sqlite(self) -> StorageResult<T> {
        self.map_err(sqlite_error)
    }
}
